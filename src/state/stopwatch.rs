//! The stopwatch aggregate: timer plus laps

use super::{analyze, Lap, LapRecorder, TimerState};
use crate::{
    error::PersistenceError,
    services::PersistedSnapshot,
    ui::{Controls, LapLine, StopwatchView},
    utils::format_time,
};

/// All mutable stopwatch state, owned in one place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    pub timer: TimerState,
    pub laps: LapRecorder,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when already running
    pub fn start(&mut self, now_ms: u64) -> bool {
        self.timer.start(now_ms)
    }

    /// Returns false when not running
    pub fn pause(&mut self, now_ms: u64) -> bool {
        self.timer.pause(now_ms)
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.laps.clear();
    }

    /// Record a lap at `now_ms`; None unless running
    pub fn lap(&mut self, now_ms: u64) -> Option<Lap> {
        if !self.timer.is_running() {
            return None;
        }
        let elapsed = self.timer.tick(now_ms);
        self.laps.record(elapsed)
    }

    /// Refresh elapsed; returns whether the timer is still running
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.timer.tick(now_ms);
        self.timer.is_running()
    }

    pub fn snapshot(&mut self, now_ms: u64) -> PersistedSnapshot {
        PersistedSnapshot {
            elapsed_time: self.timer.tick(now_ms),
            lap_number: self.laps.next_index(),
            lap_times: self.laps.durations(),
            is_running: self.timer.is_running(),
            saved_at: Some(now_ms),
        }
    }

    /// Rebuild from a snapshot
    ///
    /// A snapshot taken while running keeps running, and the wall-clock time
    /// between `saved_at` and `now_ms` counts as elapsed, as if the stopwatch
    /// had ticked through the gap. Snapshots without `saved_at` resume from
    /// the saved elapsed time.
    pub fn restore(snapshot: &PersistedSnapshot, now_ms: u64) -> Result<Self, PersistenceError> {
        snapshot.validate()?;

        let mut elapsed = snapshot.elapsed_time;
        if snapshot.is_running {
            if let Some(saved_at) = snapshot.saved_at {
                elapsed = elapsed.saturating_add(now_ms.saturating_sub(saved_at));
            }
        }

        let mut stopwatch = Self {
            timer: TimerState::paused(elapsed),
            laps: LapRecorder::from_durations(&snapshot.lap_times),
        };
        if snapshot.is_running {
            stopwatch.timer.start(now_ms);
        }
        Ok(stopwatch)
    }

    pub fn view(&self) -> StopwatchView {
        let laps = self.laps.laps();
        StopwatchView {
            phase: self.timer.phase(),
            elapsed_ms: self.timer.elapsed_ms,
            display: format_time(self.timer.elapsed_ms),
            blinking: self.timer.is_running(),
            controls: Controls::for_state(self.timer.phase(), laps.len()),
            laps: laps.iter().map(LapLine::from).collect(),
            analysis: analyze(laps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    #[test]
    fn test_lap_only_while_running() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.lap(100), None);

        sw.start(0);
        assert_eq!(sw.lap(1_000).map(|l| l.duration_ms), Some(1_000));
        sw.pause(1_500);
        assert_eq!(sw.lap(2_000), None);
        assert_eq!(sw.laps.len(), 1);
    }

    #[test]
    fn test_laps_sum_to_elapsed_across_pauses() {
        let mut sw = Stopwatch::new();
        sw.start(10_000);
        sw.lap(10_400);
        sw.pause(11_000);
        sw.start(50_000);
        sw.lap(50_333);
        sw.lap(52_000);
        assert_eq!(sw.laps.total_ms(), sw.timer.elapsed_ms);
        assert_eq!(sw.laps.durations(), vec![400, 933, 1_667]);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(500);
        sw.reset();
        assert_eq!(sw, Stopwatch::new());
        assert_eq!(sw.view().phase, Phase::Idle);
    }

    #[test]
    fn test_snapshot_restore_paused() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(300);
        sw.lap(400);
        sw.pause(900);
        let snapshot = sw.snapshot(900);

        let restored = Stopwatch::restore(&snapshot, 60_000).unwrap();
        assert_eq!(restored.timer.elapsed_ms, 900);
        assert!(!restored.timer.is_running());
        assert_eq!(restored.laps, sw.laps);
    }

    #[test]
    fn test_restore_running_ticks_through_gap() {
        let mut sw = Stopwatch::new();
        sw.start(1_000);
        let snapshot = sw.snapshot(3_000);
        assert_eq!(snapshot.elapsed_time, 2_000);

        let mut restored = Stopwatch::restore(&snapshot, 8_000).unwrap();
        assert!(restored.timer.is_running());
        assert_eq!(restored.timer.elapsed_ms, 7_000);
        restored.tick(8_500);
        assert_eq!(restored.timer.elapsed_ms, 7_500);
    }

    #[test]
    fn test_restore_running_without_timestamp_resumes_from_saved() {
        let snapshot = PersistedSnapshot {
            elapsed_time: 2_000,
            lap_number: 1,
            lap_times: vec![],
            is_running: true,
            saved_at: None,
        };
        let mut restored = Stopwatch::restore(&snapshot, 100_000).unwrap();
        restored.tick(100_250);
        assert_eq!(restored.timer.elapsed_ms, 2_250);
    }

    #[test]
    fn test_restore_rejects_lap_number_out_of_sequence() {
        let mut snapshot = PersistedSnapshot {
            elapsed_time: 1_000,
            lap_number: 9,
            lap_times: vec![100, 200],
            is_running: true,
            saved_at: None,
        };
        assert!(matches!(
            Stopwatch::restore(&snapshot, 0),
            Err(PersistenceError::Invalid(_))
        ));

        snapshot.lap_number = u32::MAX;
        snapshot.lap_times.clear();
        assert!(matches!(
            Stopwatch::restore(&snapshot, 0),
            Err(PersistenceError::Invalid(_))
        ));
    }

    #[test]
    fn test_restored_laps_continue_sequence() {
        let snapshot = PersistedSnapshot {
            elapsed_time: 1_000,
            lap_number: 3,
            lap_times: vec![100, 200],
            is_running: true,
            saved_at: None,
        };
        let mut restored = Stopwatch::restore(&snapshot, 5_000).unwrap();
        let lap = restored.lap(5_500).unwrap();
        assert_eq!(lap, Lap { index: 3, duration_ms: 1_200 });
        let indices: Vec<u32> = restored.laps.laps().iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_view_reflects_state() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(61_234);
        let view = sw.view();
        assert_eq!(view.display, "00:01:01:23");
        assert!(view.blinking);
        assert_eq!(view.laps[0].label, "Lap 1:");
        assert_eq!(view.laps[0].time, "00:01:01:23");
        assert!(view.controls.export_enabled);
        assert_eq!(view.analysis.fastest, "00:01:01:23");
    }
}
