//! State management module
//!
//! This module handles all application state, including:
//! - Current generation settings and request snapshots (settings.rs)
//! - Debouncing of text input (debounce.rs)
//! - The editing session tying settings to the last artifact (session.rs)

pub mod settings;
pub mod debounce;
pub mod session;
