//! UI building blocks
//!
//! Widgets shared by the main view:
//! - QR preview panel (preview.rs)
//! - Error-correction picker and color swatches (controls.rs)

pub mod preview;
pub mod controls;
