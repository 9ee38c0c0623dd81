//! Threat analysis handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use serde_json::Value;

use crate::{AppState, AppResult, AppError};
use crate::models::{classify, AlertRecord, ThreatReport};

/// Parse the raw request body. Only a non-empty JSON object is accepted.
pub fn parse_report(body: &[u8]) -> AppResult<ThreatReport> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::ClientInput);
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Unparseable threat report: {}", e);
        AppError::ClientInput
    })?;

    match &value {
        Value::Object(fields) if !fields.is_empty() => Ok(ThreatReport::from_value(&value)),
        _ => Err(AppError::ClientInput),
    }
}

/// Classify a threat report and forward it to the alerting API
pub async fn analyze_threat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<AlertRecord>> {
    // an unreadable body (e.g. over the size limit) is treated as no data
    let body = body.map_err(|rejection| {
        tracing::debug!("Unreadable threat report body: {}", rejection.body_text());
        AppError::ClientInput
    })?;
    let report = parse_report(&body)?;
    let record = classify(&report);

    state.alerts.send_alert(&record).await?;

    tracing::info!(
        threat_type = %record.threat_type,
        severity = record.severity.as_str(),
        confidence = record.confidence,
        "Alert forwarded"
    );

    Ok(Json(record))
}
