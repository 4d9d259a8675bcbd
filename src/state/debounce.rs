//! Input debouncing
//!
//! Coalesces bursts of "text changed" events into one regeneration after a
//! quiet period. The debouncer only does the bookkeeping; the UI schedules a
//! single-shot timer for every ticket handed out by `notify` and calls `fire`
//! when it elapses. A newer `notify` replaces the pending entry, so any older
//! timer that still fires finds a stale ticket and does nothing.

use std::time::{Duration, Instant};

/// Quiet period before a regeneration fires
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Pending<T> {
    ticket: Ticket,
    deadline: Instant,
    payload: T,
}

/// Holds at most one pending payload
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    next_ticket: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an input event, cancelling whatever was pending
    ///
    /// Returns the ticket the caller must hand back to `fire` once `delay`
    /// has elapsed.
    pub fn notify(&mut self, payload: T, now: Instant) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some(Pending {
            ticket,
            deadline: now + self.delay,
            payload,
        });
        ticket
    }

    /// Timer callback: yields the payload exactly once, and only for the
    /// most recent ticket whose deadline has passed
    pub fn fire(&mut self, ticket: Ticket, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket && now >= pending.deadline => {
                self.pending.take().map(|p| p.payload)
            }
            _ => None,
        }
    }

    /// Drop the pending payload without firing
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
