//! Alerting API client
//!
//! Delivers classified alerts to the upstream alerting API. One attempt per
//! alert, bounded by a fixed timeout.

use std::time::Duration;

use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::AlertRecord;

/// Upper bound on a single forward call
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Alerting API client
#[derive(Debug, Clone)]
pub struct AlertClient {
    alerts_url: String,
    bearer_token: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl AlertClient {
    /// Create a client for the configured alerting API
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_timeout(config, FORWARD_TIMEOUT)
    }

    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            alerts_url: config.alerts_url(),
            bearer_token: config.bearer_token.clone(),
            timeout,
            http_client,
        })
    }

    /// POST the alert to `{upstream}/api/alerts`
    pub async fn send_alert(&self, record: &AlertRecord) -> Result<(), UpstreamError> {
        tracing::debug!(url = %self.alerts_url, threat_type = %record.threat_type, "Forwarding alert");

        let response = self.http_client
            .post(&self.alerts_url)
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .json(record)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(self.timeout)
                } else {
                    UpstreamError::Network(e.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("Alerting API rejected alert ({}): {}", status, error_text);
            Err(UpstreamError::Status(status))
        }
    }
}
