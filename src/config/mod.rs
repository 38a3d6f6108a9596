//! Configuration module for the Swarm client.
//!
//! The endpoint and API key are fixed when a configuration is created; the
//! timeout fields are public so they can be tuned afterwards.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::errors::{SwarmError, SwarmResult};

/// Default base URL for the Swarm API.
pub const DEFAULT_ENDPOINT: &str = "https://swarm.binner.io";

/// Default connect timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default per-request timeout (5 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default lifetime of a pooled connection (15 minutes).
pub const DEFAULT_POOLED_CONNECTION_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// Default time allowed to drain a response body (10 seconds).
pub const DEFAULT_RESPONSE_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Swarm client.
#[derive(Clone)]
pub struct SwarmConfig {
    api_key: Option<SecretString>,
    endpoint: Url,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Overall time allowed for a single request.
    pub request_timeout: Duration,
    /// How long a pooled connection may live before the pool is recycled.
    pub pooled_connection_lifetime: Duration,
    /// Time allowed to read a response body once headers have arrived.
    pub response_drain_timeout: Duration,
}

impl SwarmConfig {
    /// Creates a configuration for the public endpoint without an API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            pooled_connection_lifetime: DEFAULT_POOLED_CONNECTION_LIFETIME,
            response_drain_timeout: DEFAULT_RESPONSE_DRAIN_TIMEOUT,
        }
    }

    /// Creates a configuration for the public endpoint with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: secret_from(api_key.into()),
            ..Self::new()
        }
    }

    /// Creates a configuration with an API key and a custom endpoint.
    ///
    /// Fails if `endpoint` is not a well-formed absolute URL.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: &str) -> SwarmResult<Self> {
        Ok(Self {
            api_key: secret_from(api_key.into()),
            endpoint: parse_endpoint(endpoint)?,
            ..Self::new()
        })
    }

    /// Creates a new configuration builder.
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SWARM_API_KEY` (optional): API key sent as `X-ApiKey`
    /// - `SWARM_ENDPOINT` (optional): Custom base URL
    /// - `SWARM_CONNECT_TIMEOUT` (optional): Connect timeout in seconds
    /// - `SWARM_REQUEST_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> SwarmResult<Self> {
        let mut builder = SwarmConfigBuilder::new();

        if let Ok(api_key) = std::env::var("SWARM_API_KEY") {
            builder = builder.api_key(api_key);
        }

        if let Ok(endpoint) = std::env::var("SWARM_ENDPOINT") {
            builder = builder.endpoint(endpoint);
        }

        if let Some(secs) = env_secs("SWARM_CONNECT_TIMEOUT") {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        if let Some(secs) = env_secs("SWARM_REQUEST_TIMEOUT") {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Returns the API key, if one is configured.
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> Option<String> {
        self.api_key().map(|key| {
            if key.len() > 4 {
                format!("...{}", &key[key.len() - 4..])
            } else {
                "****".to_string()
            }
        })
    }

    /// Returns the base URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the full URL for an API path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SwarmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwarmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint.as_str())
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("pooled_connection_lifetime", &self.pooled_connection_lifetime)
            .field("response_drain_timeout", &self.response_drain_timeout)
            .finish()
    }
}

/// Builder for `SwarmConfig`.
#[derive(Default)]
pub struct SwarmConfigBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    pooled_connection_lifetime: Option<Duration>,
    response_drain_timeout: Option<Duration>,
}

impl SwarmConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the pooled connection lifetime.
    pub fn pooled_connection_lifetime(mut self, lifetime: Duration) -> Self {
        self.pooled_connection_lifetime = Some(lifetime);
        self
    }

    /// Sets the response drain timeout.
    pub fn response_drain_timeout(mut self, timeout: Duration) -> Self {
        self.response_drain_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SwarmResult<SwarmConfig> {
        let endpoint = match self.endpoint {
            Some(endpoint) => parse_endpoint(&endpoint)?,
            None => default_endpoint(),
        };

        Ok(SwarmConfig {
            api_key: self.api_key.and_then(secret_from),
            endpoint,
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            pooled_connection_lifetime: self
                .pooled_connection_lifetime
                .unwrap_or(DEFAULT_POOLED_CONNECTION_LIFETIME),
            response_drain_timeout: self
                .response_drain_timeout
                .unwrap_or(DEFAULT_RESPONSE_DRAIN_TIMEOUT),
        })
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).unwrap_or_else(|_| unreachable!("default endpoint is valid"))
}

fn parse_endpoint(endpoint: &str) -> SwarmResult<Url> {
    let url = Url::parse(endpoint)?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(SwarmError::Configuration {
            message: format!("Endpoint must be an http(s) URL: {}", endpoint),
        });
    }
    Ok(url)
}

fn secret_from(api_key: String) -> Option<SecretString> {
    if api_key.trim().is_empty() {
        None
    } else {
        Some(SecretString::new(api_key))
    }
}

fn env_secs(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwarmConfig::default();

        assert_eq!(config.endpoint().as_str(), "https://swarm.binner.io/");
        assert!(!config.has_api_key());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.pooled_connection_lifetime, Duration::from_secs(900));
        assert_eq!(config.response_drain_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_with_api_key() {
        let config = SwarmConfig::with_api_key("swarm-key-12345");

        assert_eq!(config.api_key(), Some("swarm-key-12345"));
        assert_eq!(config.endpoint().as_str(), "https://swarm.binner.io/");
    }

    #[test]
    fn test_empty_api_key_is_treated_as_absent() {
        let config = SwarmConfig::with_api_key("");
        assert!(!config.has_api_key());
        assert_eq!(config.api_key_hint(), None);
    }

    #[test]
    fn test_with_endpoint() {
        let config = SwarmConfig::with_endpoint("key", "http://localhost:8080").unwrap();
        assert_eq!(config.endpoint_url("part/search"), "http://localhost:8080/part/search");
    }

    #[test]
    fn test_invalid_endpoint_fails_at_construction() {
        assert!(SwarmConfig::with_endpoint("key", "not a url").is_err());
        assert!(SwarmConfig::with_endpoint("key", "mailto:parts@example.com").is_err());
        assert!(SwarmConfig::builder().endpoint("::").build().is_err());
    }

    #[test]
    fn test_timeouts_are_tunable_after_construction() {
        let mut config = SwarmConfig::with_api_key("key");
        config.request_timeout = Duration::from_millis(250);
        config.response_drain_timeout = Duration::from_secs(1);

        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.response_drain_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_overrides() {
        let config = SwarmConfig::builder()
            .api_key("key")
            .endpoint("https://swarm.example.com/api/")
            .connect_timeout(Duration::from_secs(2))
            .request_timeout(Duration::from_secs(3))
            .pooled_connection_lifetime(Duration::from_secs(60))
            .response_drain_timeout(Duration::from_secs(4))
            .build()
            .unwrap();

        assert_eq!(
            config.endpoint_url("/part/info"),
            "https://swarm.example.com/api/part/info"
        );
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.pooled_connection_lifetime, Duration::from_secs(60));
        assert_eq!(config.response_drain_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_api_key_hint() {
        let config = SwarmConfig::with_api_key("secret_key_12345");

        let hint = config.api_key_hint().unwrap();
        assert_eq!(hint, "...2345");
        assert!(!hint.contains("secret"));
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = SwarmConfig::with_api_key("secret_key_12345");

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret_key_12345"));
    }
}
