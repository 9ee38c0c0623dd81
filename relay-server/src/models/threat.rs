//! Threat report and alert record models

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_THREAT_TYPE: &str = "intrusion";
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_LAT: f64 = 34.05;
pub const DEFAULT_LON: f64 = 77.05;

/// Reports above this confidence are high severity
pub const HIGH_SEVERITY_THRESHOLD: f64 = 0.7;

pub const PATROL_SUGGESTION: &str = "Deploy patrol team";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
}

impl Default for Geo {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > HIGH_SEVERITY_THRESHOLD {
            Severity::High
        } else {
            Severity::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }
}

/// Inbound threat report. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreatReport {
    pub threat_type: Option<String>,
    pub confidence: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl ThreatReport {
    /// Read a report out of arbitrary JSON. Fields of the wrong type are
    /// treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let geo = value.get("geo");

        Self {
            threat_type: value.get("type").and_then(Value::as_str).map(str::to_string),
            confidence: value.get("confidence").and_then(Value::as_f64),
            lat: geo.and_then(|g| g.get("lat")).and_then(Value::as_f64),
            lon: geo.and_then(|g| g.get("lon")).and_then(Value::as_f64),
        }
    }
}

/// Classified alert forwarded to the alerting API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    #[serde(rename = "type")]
    pub threat_type: String,
    pub severity: Severity,
    pub suggestion: String,
    pub confidence: f64,
    pub geo: Geo,
}

/// Derive an alert record from a report, filling defaults
pub fn classify(report: &ThreatReport) -> AlertRecord {
    let confidence = report.confidence.unwrap_or(DEFAULT_CONFIDENCE);
    let defaults = Geo::default();

    AlertRecord {
        threat_type: report
            .threat_type
            .clone()
            .unwrap_or_else(|| DEFAULT_THREAT_TYPE.to_string()),
        severity: Severity::from_confidence(confidence),
        suggestion: PATROL_SUGGESTION.to_string(),
        confidence,
        geo: Geo {
            lat: report.lat.unwrap_or(defaults.lat),
            lon: report.lon.unwrap_or(defaults.lon),
        },
    }
}
