//! Utility functions module
//!
//! Clock sources, duration formatting and signal handling.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use format::format_time;
pub use signals::shutdown_signal;
