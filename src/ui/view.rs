//! Serializable view of the stopwatch for rendering

use serde::{Deserialize, Serialize};

use super::Controls;
use crate::{
    services::lap_label,
    state::{Lap, LapAnalysis, Phase},
    utils::format_time,
};

/// One rendered row of the lap list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapLine {
    pub index: u32,
    pub duration_ms: u64,
    pub label: String,
    pub time: String,
}

impl From<&Lap> for LapLine {
    fn from(lap: &Lap) -> Self {
        Self {
            index: lap.index,
            duration_ms: lap.duration_ms,
            label: lap_label(lap.index),
            time: format_time(lap.duration_ms),
        }
    }
}

/// Everything the page needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchView {
    pub phase: Phase,
    pub elapsed_ms: u64,
    pub display: String,
    /// Colon blink animation runs while the timer runs
    pub blinking: bool,
    pub controls: Controls,
    pub laps: Vec<LapLine>,
    pub analysis: LapAnalysis,
}
