//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod error;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Static page
        .route("/", get(index_handler))
        .route("/app.js", get(app_js_handler))
        .route("/style.css", get(style_handler))
        .route("/sw.js", get(service_worker_handler))
        .route("/manifest.json", get(manifest_handler))
        // Stopwatch actions
        .route("/api/start", post(start_handler))
        .route("/api/pause", post(pause_handler))
        .route("/api/lap", post(lap_handler))
        .route("/api/reset", post(reset_handler))
        .route("/api/press/main", post(press_main_handler))
        .route("/api/press/secondary", post(press_secondary_handler))
        .route("/api/key/:code", post(key_handler))
        // Reads
        .route("/api/state", get(state_handler))
        .route("/api/events", get(events_handler))
        .route("/api/export", get(export_handler))
        .route("/api/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
