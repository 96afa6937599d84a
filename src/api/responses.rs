//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ui::StopwatchView;

/// Response for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// "ok" when an action ran, "ignored" when input was gated off
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub stopwatch: StopwatchView,
}

impl ApiResponse {
    pub fn new(status: String, message: String, stopwatch: StopwatchView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            stopwatch,
        }
    }

    pub fn ok(message: String, stopwatch: StopwatchView) -> Self {
        Self::new("ok".to_string(), message, stopwatch)
    }

    pub fn ignored(message: String, stopwatch: StopwatchView) -> Self {
        Self::new("ignored".to_string(), message, stopwatch)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}
