//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::time::Duration;

pub type AppResult<T> = Result<T, AppError>;

/// Startup configuration errors. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BEARER_TOKEN must be set to a non-empty value (environment or .env)")]
    MissingToken,

    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
}

/// Failures delivering an alert to the upstream API
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream responded with status {0}")]
    Status(u16),
}

#[derive(Debug)]
pub enum AppError {
    // Missing or unparseable request body
    ClientInput,

    // Alert delivery failed
    Upstream(UpstreamError),

    // Anything else
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ClientInput => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller
    pub fn message(&self) -> String {
        match self {
            AppError::ClientInput => "No data provided".to_string(),
            AppError::Upstream(err) => format!("Failed to send alert: {}", err),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ClientInput => tracing::warn!("Rejected threat report: no data provided"),
            AppError::Upstream(err) => tracing::error!(error = %err, "Failed to send alert"),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        let body = Json(json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::ClientInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Upstream(UpstreamError::Status(502)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::ClientInput.message(), "No data provided");
        assert_eq!(
            AppError::Upstream(UpstreamError::Timeout(Duration::from_secs(5))).message(),
            "Failed to send alert: request timed out after 5s"
        );
        // internal details never reach the caller
        assert_eq!(
            AppError::Internal("db password leaked".into()).message(),
            "Internal server error"
        );
    }
}
