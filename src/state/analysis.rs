//! Fastest / slowest / average lap statistics

use serde::{Deserialize, Serialize};

use super::Lap;
use crate::utils::format_time;

/// Shown in place of a statistic when no laps exist
pub const PLACEHOLDER: &str = "-";

/// Raw lap statistics in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapStatistics {
    pub fastest_ms: u64,
    pub slowest_ms: u64,
    /// Arithmetic mean, truncated to whole milliseconds
    pub average_ms: u64,
}

impl LapStatistics {
    /// None when there are no laps
    pub fn compute(laps: &[Lap]) -> Option<Self> {
        let fastest_ms = laps.iter().map(|lap| lap.duration_ms).min()?;
        let slowest_ms = laps.iter().map(|lap| lap.duration_ms).max()?;
        let total: u64 = laps.iter().map(|lap| lap.duration_ms).sum();
        Some(Self {
            fastest_ms,
            slowest_ms,
            average_ms: total / laps.len() as u64,
        })
    }
}

/// Formatted statistic readouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapAnalysis {
    pub fastest: String,
    pub slowest: String,
    pub average: String,
}

impl LapAnalysis {
    pub fn empty() -> Self {
        Self {
            fastest: PLACEHOLDER.to_string(),
            slowest: PLACEHOLDER.to_string(),
            average: PLACEHOLDER.to_string(),
        }
    }
}

/// Format the statistics for `laps`, or placeholders when empty
pub fn analyze(laps: &[Lap]) -> LapAnalysis {
    match LapStatistics::compute(laps) {
        Some(stats) => LapAnalysis {
            fastest: format_time(stats.fastest_ms),
            slowest: format_time(stats.slowest_ms),
            average: format_time(stats.average_ms),
        },
        None => LapAnalysis::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LapRecorder;

    #[test]
    fn test_analyze_three_laps() {
        let recorder = LapRecorder::from_durations(&[300, 100, 200]);
        let stats = LapStatistics::compute(recorder.laps()).unwrap();
        assert_eq!(stats, LapStatistics { fastest_ms: 100, slowest_ms: 300, average_ms: 200 });

        let analysis = analyze(recorder.laps());
        assert_eq!(analysis.fastest, format_time(100));
        assert_eq!(analysis.slowest, format_time(300));
        assert_eq!(analysis.average, format_time(200));
    }

    #[test]
    fn test_analyze_empty_uses_placeholder() {
        assert_eq!(LapStatistics::compute(&[]), None);
        assert_eq!(analyze(&[]), LapAnalysis::empty());
        assert_eq!(analyze(&[]).average, "-");
    }

    #[test]
    fn test_average_truncates() {
        let recorder = LapRecorder::from_durations(&[1_000, 1_015]);
        assert_eq!(LapStatistics::compute(recorder.laps()).unwrap().average_ms, 1_007);
        assert_eq!(analyze(recorder.laps()).average, "00:00:01:00");
    }
}
