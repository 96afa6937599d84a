//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use super::Stopwatch;
use crate::{
    error::StopwatchError,
    services::{render_lap_export, SnapshotStore},
    tasks::run_ticker,
    ui::{Action, Controls, Key, StopwatchView},
    utils::Clock,
};

/// Shared handle owning the stopwatch, its tick task and its persistence slot
#[derive(Debug)]
pub struct AppState {
    stopwatch: Mutex<Stopwatch>,
    store: SnapshotStore,
    clock: Arc<dyn Clock>,
    /// Cadence of the display refresh while running
    pub tick_interval: Duration,
    ticker: Mutex<Option<JoinHandle<()>>>,
    /// Server metadata
    pub start_time: Instant,
    /// Channel for display updates
    pub view_tx: watch::Sender<StopwatchView>,
    /// Keep the receiver alive to prevent channel closure
    _view_rx: watch::Receiver<StopwatchView>,
}

impl AppState {
    /// Create an idle AppState
    pub fn new(store: SnapshotStore, clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        let stopwatch = Stopwatch::new();
        let (view_tx, view_rx) = watch::channel(stopwatch.view());

        Self {
            stopwatch: Mutex::new(stopwatch),
            store,
            clock,
            tick_interval,
            ticker: Mutex::new(None),
            start_time: Instant::now(),
            view_tx,
            _view_rx: view_rx,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Stopwatch>, StopwatchError> {
        self.stopwatch.lock().map_err(|_| StopwatchError::Lock("stopwatch"))
    }

    /// Current view without mutating anything
    pub fn view(&self) -> Result<StopwatchView, StopwatchError> {
        Ok(self.lock()?.view())
    }

    /// Start or resume; a no-op while already running
    pub fn start(self: &Arc<Self>) -> Result<(bool, StopwatchView), StopwatchError> {
        self.apply(Action::Start)
    }

    /// Pause; the tick task is cancelled before this returns
    pub fn pause(self: &Arc<Self>) -> Result<(bool, StopwatchView), StopwatchError> {
        self.apply(Action::Pause)
    }

    /// Back to idle: no laps, no elapsed time, no snapshot
    pub fn reset(self: &Arc<Self>) -> Result<(bool, StopwatchView), StopwatchError> {
        self.apply(Action::Reset)
    }

    /// Record a lap; a no-op unless running
    pub fn lap(self: &Arc<Self>) -> Result<(bool, StopwatchView), StopwatchError> {
        self.apply(Action::Lap)
    }

    /// Periodic refresh; returns false once the timer is no longer running
    pub fn tick(&self) -> Result<bool, StopwatchError> {
        let now = self.clock.now_ms();
        let mut stopwatch = self.lock()?;

        if !stopwatch.tick(now) {
            return Ok(false);
        }
        self.publish(&stopwatch);
        Ok(true)
    }

    /// Run an action; the flag is false when it was a no-op
    pub fn apply(self: &Arc<Self>, action: Action) -> Result<(bool, StopwatchView), StopwatchError> {
        let mut stopwatch = self.lock()?;
        self.apply_locked(&mut stopwatch, action)
    }

    /// Main button click
    pub fn press_main(self: &Arc<Self>) -> Result<(Option<Action>, StopwatchView), StopwatchError> {
        self.press_with(|controls| Some(controls.press_main()))
    }

    /// Secondary button click; ignored while the button is disabled
    pub fn press_secondary(self: &Arc<Self>) -> Result<(Option<Action>, StopwatchView), StopwatchError> {
        self.press_with(Controls::press_secondary)
    }

    /// Keyboard shortcut; unknown or currently unbound keys are ignored
    pub fn press_key(self: &Arc<Self>, code: &str) -> Result<(Option<Action>, StopwatchView), StopwatchError> {
        let key = Key::from_code(code);
        let pressed = self.press_with(|controls| key.and_then(|key| controls.press_key(key)))?;
        if let Some(action) = pressed.0 {
            debug!("Key {} mapped to {:?}", code, action);
        }
        Ok(pressed)
    }

    /// Decide the action from the controls and run it under one lock
    fn press_with<F>(self: &Arc<Self>, decide: F) -> Result<(Option<Action>, StopwatchView), StopwatchError>
    where
        F: FnOnce(&Controls) -> Option<Action>,
    {
        let mut stopwatch = self.lock()?;
        let controls = Controls::for_state(stopwatch.timer.phase(), stopwatch.laps.len());

        match decide(&controls) {
            Some(action) => {
                let (_, view) = self.apply_locked(&mut stopwatch, action)?;
                Ok((Some(action), view))
            }
            None => Ok((None, stopwatch.view())),
        }
    }

    fn apply_locked(
        self: &Arc<Self>,
        stopwatch: &mut Stopwatch,
        action: Action,
    ) -> Result<(bool, StopwatchView), StopwatchError> {
        let now = self.clock.now_ms();

        match action {
            Action::Start => {
                if !stopwatch.start(now) {
                    debug!("Start ignored, already running");
                    return Ok((false, stopwatch.view()));
                }
                info!("Stopwatch started at {}ms elapsed", stopwatch.timer.elapsed_ms);
                self.arm_ticker()?;
                self.persist(stopwatch, now);
            }
            Action::Pause => {
                let paused = stopwatch.pause(now);
                self.disarm_ticker()?;
                if !paused {
                    debug!("Pause ignored, not running");
                    return Ok((false, stopwatch.view()));
                }
                info!("Stopwatch paused at {}ms", stopwatch.timer.elapsed_ms);
                self.persist(stopwatch, now);
            }
            Action::Lap => match stopwatch.lap(now) {
                Some(lap) => {
                    info!("Lap {} recorded: {}ms", lap.index, lap.duration_ms);
                    self.persist(stopwatch, now);
                }
                None => {
                    debug!("Lap ignored, not running");
                    return Ok((false, stopwatch.view()));
                }
            },
            Action::Reset => {
                stopwatch.reset();
                self.disarm_ticker()?;
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear snapshot: {}", e);
                }
                info!("Stopwatch reset");
            }
        }
        Ok((true, self.publish(stopwatch)))
    }

    /// Lap list as export text
    pub fn export(&self) -> Result<String, StopwatchError> {
        let stopwatch = self.lock()?;
        render_lap_export(stopwatch.laps.laps())
    }

    /// Restore from the snapshot slot, falling back to idle on any error
    pub fn restore(self: &Arc<Self>) -> Result<StopwatchView, StopwatchError> {
        let now = self.clock.now_ms();
        let restored = match self.store.load() {
            Ok(Some(snapshot)) => match Stopwatch::restore(&snapshot, now) {
                Ok(stopwatch) => Some(stopwatch),
                Err(e) => {
                    warn!("Ignoring snapshot: {}", e);
                    None
                }
            },
            Ok(None) => {
                debug!("No snapshot at {}", self.store.path().display());
                None
            }
            Err(e) => {
                warn!("Failed to load snapshot, starting idle: {}", e);
                None
            }
        };

        let mut stopwatch = self.lock()?;
        *stopwatch = restored.unwrap_or_default();
        if stopwatch.timer.is_running() {
            info!("Restored running stopwatch at {}ms", stopwatch.timer.elapsed_ms);
            self.arm_ticker()?;
        } else {
            self.disarm_ticker()?;
            info!(
                "Restored stopwatch: {}ms elapsed, {} laps",
                stopwatch.timer.elapsed_ms,
                stopwatch.laps.len()
            );
        }
        Ok(self.publish(&stopwatch))
    }

    /// Whether a tick task is currently alive
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    fn arm_ticker(self: &Arc<Self>) -> Result<(), StopwatchError> {
        let mut slot = self.ticker.lock().map_err(|_| StopwatchError::Lock("ticker"))?;
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        *slot = Some(tokio::spawn(run_ticker(Arc::clone(self))));
        Ok(())
    }

    fn disarm_ticker(&self) -> Result<(), StopwatchError> {
        let mut slot = self.ticker.lock().map_err(|_| StopwatchError::Lock("ticker"))?;
        if let Some(handle) = slot.take() {
            handle.abort();
            debug!("Tick task cancelled");
        }
        Ok(())
    }

    fn persist(&self, stopwatch: &mut Stopwatch, now_ms: u64) {
        if let Err(e) = self.store.save(&stopwatch.snapshot(now_ms)) {
            warn!("Failed to save snapshot: {}", e);
        }
    }

    fn publish(&self, stopwatch: &Stopwatch) -> StopwatchView {
        let view = stopwatch.view();
        if let Err(e) = self.view_tx.send(view.clone()) {
            warn!("Failed to send view update: {}", e);
        }
        view
    }
}
