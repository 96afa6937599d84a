//! Plain-text lap export

use crate::{error::StopwatchError, state::Lap, utils::format_time};

/// Download filename for exported laps
pub const EXPORT_FILENAME: &str = "lap_times.txt";
/// MIME type of the export resource
pub const EXPORT_MIME: &str = "text/plain";

/// Display label for a lap, e.g. "Lap 3:"
pub fn lap_label(index: u32) -> String {
    format!("Lap {}:", index)
}

/// Render laps one per line as "Lap N: HH:MM:SS:CC"
pub fn render_lap_export(laps: &[Lap]) -> Result<String, StopwatchError> {
    if laps.is_empty() {
        return Err(StopwatchError::NoLaps);
    }
    Ok(laps
        .iter()
        .map(|lap| format!("{} {}", lap_label(lap.index), format_time(lap.duration_ms)))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LapRecorder;

    #[test]
    fn test_render_export() {
        let recorder = LapRecorder::from_durations(&[61_234, 500]);
        let text = render_lap_export(recorder.laps()).unwrap();
        assert_eq!(text, "Lap 1: 00:01:01:23\nLap 2: 00:00:00:50");
    }

    #[test]
    fn test_export_without_laps_is_refused() {
        assert!(matches!(render_lap_export(&[]), Err(StopwatchError::NoLaps)));
    }
}
