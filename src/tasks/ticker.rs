//! Display refresh tick task

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};

use crate::state::AppState;

/// Refresh elapsed time until the stopwatch stops running
///
/// Spawned on start and aborted on pause or reset. A tick that races a
/// transition sees a stopped timer and exits without touching state.
pub async fn run_ticker(state: Arc<AppState>) {
    debug!("Starting tick task every {:?}", state.tick_interval);

    let mut ticks = interval(state.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticks.tick().await;

        match state.tick() {
            Ok(true) => {}
            Ok(false) => {
                debug!("Timer no longer running, tick task exiting");
                break;
            }
            Err(e) => {
                error!("Tick failed: {}", e);
                break;
            }
        }
    }
}
