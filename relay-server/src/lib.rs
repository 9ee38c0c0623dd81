//! Threat Relay
//!
//! Receives threat reports, attaches a severity and suggestion, and forwards
//! the resulting alert to the upstream alerting API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  POST /api/analyze-threat  ┌──────────────────────────┐
//! │  Sensor  │ ─────────────────────────▶ │       THREAT RELAY       │
//! │  / Agent │ ◀───────────────────────── │  parse ▶ classify ▶ send │
//! └──────────┘   200 record | 400 | 500   └────────────┬─────────────┘
//!                                                      │ POST /api/alerts
//!                                                      │ Bearer token, 5s
//!                                                      ▼
//!                                         ┌──────────────────────────┐
//!                                         │    Alerting API          │
//!                                         └──────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod upstream;

use std::any::Any;

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use config::{Config, LogFormat};
use upstream::AlertClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub alerts: AlertClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let alerts = AlertClient::new(&config)?;
        Ok(Self { config, alerts })
    }
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/analyze-threat", post(handlers::analyze::analyze_threat))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin)
        )
        .with_state(state)
}

/// Turn a handler panic into the generic internal error response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Install the global tracing subscriber.
/// RUST_LOG takes precedence over the config's default filter.
pub fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_log_filter().into());

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}
