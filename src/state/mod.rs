//! State management module
//!
//! The timer engine, lap bookkeeping and statistics, and the shared
//! application state that drives them.

pub mod analysis;
pub mod app_state;
pub mod laps;
pub mod stopwatch;
pub mod timer_state;

// Re-export main types
pub use analysis::{analyze, LapAnalysis, LapStatistics, PLACEHOLDER};
pub use app_state::AppState;
pub use laps::{Lap, LapRecorder};
pub use stopwatch::Stopwatch;
pub use timer_state::{Phase, TimerState};
