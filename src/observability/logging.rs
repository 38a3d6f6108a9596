//! Logging configuration and utilities.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::EnvFilter;

use crate::errors::{SwarmError, SwarmResult};

/// Maximum number of body characters written to a log line.
pub const MAX_LOGGED_BODY: usize = 512;

static API_KEY_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r#"(?i)((?:x-?)?api[-_]?key["']?\s*[:=]\s*["']?)[^\s"',}]+"#).ok()
});

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Include the event target.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "swarm_client=info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Creates a new log configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback filter directive.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Switches to JSON output.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Installs a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LogConfig::filter`]. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> SwarmResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| SwarmError::Configuration {
            message: format!("Invalid log filter: {}", e),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| SwarmError::Configuration {
        message: format!("Failed to install tracing subscriber: {}", e),
    })
}

/// Prepares a response body for logging: masks API keys and truncates.
pub fn redact_body(body: &str) -> String {
    let redacted = match API_KEY_PATTERN.as_ref() {
        Some(re) => re.replace_all(body, "${1}***").into_owned(),
        None => body.to_string(),
    };

    if redacted.chars().count() > MAX_LOGGED_BODY {
        let truncated: String = redacted.chars().take(MAX_LOGGED_BODY).collect();
        format!("{}...", truncated)
    } else {
        redacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_api_key() {
        let redacted = redact_body(r#"{"message":"Invalid X-ApiKey: abc123secret"}"#);
        assert!(!redacted.contains("abc123secret"));
        assert!(redacted.contains("X-ApiKey: ***"));

        let redacted = redact_body(r#"{"apiKey":"abc123secret"}"#);
        assert!(!redacted.contains("abc123secret"));
    }

    #[test]
    fn test_redact_leaves_plain_bodies() {
        let body = "<html>Bad Gateway</html>";
        assert_eq!(redact_body(body), body);
    }

    #[test]
    fn test_redact_truncates_long_bodies() {
        let body = "x".repeat(MAX_LOGGED_BODY * 2);
        let redacted = redact_body(&body);

        assert_eq!(redacted.len(), MAX_LOGGED_BODY + 3);
        assert!(redacted.ends_with("..."));
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new().filter("swarm_client=debug").json();
        assert_eq!(config.filter, "swarm_client=debug");
        assert!(config.json);
    }
}
