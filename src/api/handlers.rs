//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, info};

use super::{
    error::ApiError,
    responses::{ApiResponse, HealthResponse},
};
use crate::{
    services::{EXPORT_FILENAME, EXPORT_MIME},
    state::AppState,
    ui::{Action, StopwatchView},
};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const APP_JS: &str = include_str!("../../static/app.js");
const STYLE_CSS: &str = include_str!("../../static/style.css");
const SERVICE_WORKER_JS: &str = include_str!("../../static/sw.js");
const MANIFEST_JSON: &str = include_str!("../../static/manifest.json");

fn action_message(action: Action) -> &'static str {
    match action {
        Action::Start => "Stopwatch running",
        Action::Pause => "Stopwatch paused",
        Action::Lap => "Lap recorded",
        Action::Reset => "Stopwatch reset",
    }
}

fn gated(action: Option<Action>, view: StopwatchView, input: &str) -> Json<ApiResponse> {
    match action {
        Some(action) => Json(ApiResponse::ok(action_message(action).to_string(), view)),
        None => Json(ApiResponse::ignored(format!("{} has no action right now", input), view)),
    }
}

fn outcome(action: Action, changed: bool, view: StopwatchView) -> Json<ApiResponse> {
    if changed {
        Json(ApiResponse::ok(action_message(action).to_string(), view))
    } else {
        Json(ApiResponse::ignored(format!("{:?} has no effect right now", action), view))
    }
}

/// Handle POST /api/start - Start or resume
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (changed, view) = state.start()?;
    Ok(outcome(Action::Start, changed, view))
}

/// Handle POST /api/pause - Pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (changed, view) = state.pause()?;
    Ok(outcome(Action::Pause, changed, view))
}

/// Handle POST /api/lap - Record a lap
pub async fn lap_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (changed, view) = state.lap()?;
    Ok(outcome(Action::Lap, changed, view))
}

/// Handle POST /api/reset - Clear everything
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (changed, view) = state.reset()?;
    Ok(outcome(Action::Reset, changed, view))
}

/// Handle POST /api/press/main - Main button click
pub async fn press_main_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (action, view) = state.press_main()?;
    Ok(gated(action, view, "Main button"))
}

/// Handle POST /api/press/secondary - Secondary button click
pub async fn press_secondary_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (action, view) = state.press_secondary()?;
    Ok(gated(action, view, "Secondary button"))
}

/// Handle POST /api/key/:code - Keyboard shortcut
pub async fn key_handler(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let (action, view) = state.press_key(&code)?;
    Ok(gated(action, view, &format!("Key {}", code)))
}

/// Handle GET /api/state - Current view
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Result<Json<StopwatchView>, ApiError> {
    Ok(Json(state.view()?))
}

/// Handle GET /api/events - Stream views as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("Event stream opened");
    let rx = state.view_tx.subscribe();
    let current = rx.borrow().clone();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let view = rx.borrow_and_update().clone();
        Some((Event::default().json_data(&view), rx))
    });
    let events = stream::once(async move { Event::default().json_data(&current) }).chain(updates);

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /api/export - Download laps as text
pub async fn export_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let body = state.export()?;
    info!("Exporting laps as {}", EXPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    ))
}

/// Handle GET /api/health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}

pub async fn index_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], INDEX_HTML)
}

pub async fn app_js_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}

pub async fn style_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLE_CSS)
}

/// Offline-caching worker registered by the page
pub async fn service_worker_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], SERVICE_WORKER_JS)
}

pub async fn manifest_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/manifest+json")], MANIFEST_JSON)
}
