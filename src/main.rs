//! Lapwatch - a stopwatch service with lap splits
//!
//! This is the main entry point for the lapwatch server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use lapwatch::{
    api::create_router,
    config::Config,
    services::SnapshotStore,
    state::AppState,
    utils::{shutdown_signal, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("lapwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting lapwatch server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, data_dir={}, tick={}ms",
        config.host,
        config.port,
        config.data_dir.display(),
        config.tick_ms
    );

    let store = SnapshotStore::new(&config.data_dir);
    let state = Arc::new(AppState::new(store, Arc::new(SystemClock), config.tick_interval()));

    // Pick up where the last run left off
    let view = state.restore()?;
    info!("Stopwatch state on load: {:?} at {}", view.phase, view.display);

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                     - Stopwatch page");
    info!("  POST /api/press/main       - Main button (Start/Pause/Resume)");
    info!("  POST /api/press/secondary  - Secondary button (Lap/Reset)");
    info!("  POST /api/key/:code        - Keyboard shortcut (Space, KeyL, KeyR)");
    info!("  GET  /api/state            - Current stopwatch view");
    info!("  GET  /api/events           - Live view updates");
    info!("  GET  /api/export           - Download lap_times.txt");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
