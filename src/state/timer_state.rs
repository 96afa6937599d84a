//! Timer state structure and the running/paused state machine

use serde::{Deserialize, Serialize};

/// Coarse stopwatch phase derived from the timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No elapsed time and not running
    Idle,
    Running,
    /// Elapsed time recorded, not running
    Paused,
}

/// Elapsed-time accumulation for the stopwatch
///
/// While running, `elapsed_ms = now - start_epoch_ms`. The reference start is
/// shifted back by the already-elapsed time on every start so elapsed stays
/// continuous across pause and resume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub running: bool,
    pub start_epoch_ms: u64,
    pub elapsed_ms: u64,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paused timer state holding `elapsed_ms`
    pub fn paused(elapsed_ms: u64) -> Self {
        Self {
            running: false,
            start_epoch_ms: 0,
            elapsed_ms,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.elapsed_ms > 0 {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin or resume running. Returns false if already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }
        self.start_epoch_ms = now_ms.saturating_sub(self.elapsed_ms);
        self.running = true;
        true
    }

    /// Freeze elapsed at its value for `now_ms`. Returns false if not running.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.tick(now_ms);
        self.running = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Recompute elapsed for `now_ms`; elapsed never moves backwards
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        if self.running {
            let current = now_ms.saturating_sub(self.start_epoch_ms);
            self.elapsed_ms = self.elapsed_ms.max(current);
        }
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_pause_resume() {
        let mut timer = TimerState::new();
        assert_eq!(timer.phase(), Phase::Idle);

        assert!(timer.start(1_000));
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.tick(1_500), 500);

        assert!(timer.pause(2_000));
        assert_eq!(timer.phase(), Phase::Paused);
        assert_eq!(timer.tick(9_000), 1_000); // frozen while paused

        assert!(timer.start(10_000));
        assert_eq!(timer.tick(10_250), 1_250);
    }

    #[test]
    fn test_double_start_keeps_reference() {
        let mut timer = TimerState::new();
        assert!(timer.start(100));
        let reference = timer.start_epoch_ms;
        assert!(!timer.start(700));
        assert_eq!(timer.start_epoch_ms, reference);
        assert_eq!(timer.tick(900), 800);
    }

    #[test]
    fn test_pause_when_idle_is_noop() {
        let mut timer = TimerState::new();
        assert!(!timer.pause(50));
        assert_eq!(timer, TimerState::new());
    }

    #[test]
    fn test_clock_going_backwards_does_not_shrink_elapsed() {
        let mut timer = TimerState::new();
        timer.start(1_000);
        assert_eq!(timer.tick(2_000), 1_000);
        assert_eq!(timer.tick(1_500), 1_000);
    }

    #[test]
    fn test_reset() {
        let mut timer = TimerState::paused(4_200);
        assert_eq!(timer.phase(), Phase::Paused);
        timer.reset();
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.elapsed_ms, 0);
    }
}
