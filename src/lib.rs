//! Lapwatch - a stopwatch service with lap splits
//!
//! This library provides the timer engine, lap bookkeeping and statistics,
//! snapshot persistence, lap export, and the HTTP API that serves the
//! browser UI.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{PersistenceError, StopwatchError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
