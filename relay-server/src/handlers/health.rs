//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Where accepted alerts are forwarded
    alerts_endpoint: String,
    debug: bool,
    timestamp: i64,
}

/// Liveness probe. Reports configuration only, never contacts the alerting API.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        alerts_endpoint: state.config.alerts_url(),
        debug: state.config.debug,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
