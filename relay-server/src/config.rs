//! Configuration module

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Default upstream alerting API
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Relay configuration, read once at startup
#[derive(Clone)]
pub struct Config {
    /// Bearer token presented to the alerting API
    pub bearer_token: String,

    /// Base URL of the alerting API (no trailing slash)
    pub upstream_url: String,

    /// Server port
    pub port: u16,

    /// Verbose logging
    pub debug: bool,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bearer_token = lookup("API_BEARER_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let upstream_url = lookup("API_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let debug = lookup("DEBUG")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bearer_token,
            upstream_url,
            port,
            debug,
            log_format,
        })
    }

    /// Full URL of the alerts endpoint
    pub fn alerts_url(&self) -> String {
        format!("{}/api/alerts", self.upstream_url)
    }

    /// Default log filter when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "threat_relay=debug,tower_http=debug"
        } else {
            "threat_relay=info,tower_http=info"
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bearer_token", &"[REDACTED]")
            .field("upstream_url", &self.upstream_url)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("API_BEARER_TOKEN", "secret")]).unwrap();
        assert_eq!(config.bearer_token, "secret");
        assert_eq!(config.upstream_url, DEFAULT_API_URL);
        assert_eq!(config.port, 5000);
        assert!(!config.debug);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.alerts_url(), "http://localhost:3000/api/alerts");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingToken)));
        assert!(matches!(
            load(&[("API_BEARER_TOKEN", "")]),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            load(&[("API_BEARER_TOKEN", "   ")]),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("API_BEARER_TOKEN", "secret"),
            ("API_URL", "https://alerts.example.com/"),
            ("PORT", "8081"),
            ("DEBUG", "True"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.upstream_url, "https://alerts.example.com");
        assert_eq!(config.alerts_url(), "https://alerts.example.com/api/alerts");
        assert_eq!(config.port, 8081);
        assert!(config.debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_log_filter(), "threat_relay=debug,tower_http=debug");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("API_BEARER_TOKEN", "secret"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "eighty"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = load(&[("API_BEARER_TOKEN", "super-secret-token")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
