//! Authentication for the Swarm client.
//!
//! The Swarm API accepts anonymous requests; a configured key raises the
//! caller's rate limit and is sent in the `X-ApiKey` header.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Header carrying the Swarm API key.
pub const API_KEY_HEADER: &str = "X-ApiKey";

/// Authentication provider trait.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);
}

/// API key authentication provider.
pub struct ApiKeyAuth {
    api_key: Option<SecretString>,
}

impl ApiKeyAuth {
    /// Creates a provider from an optional key. Empty keys are ignored.
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key
                .filter(|key| !key.is_empty())
                .map(|key| SecretString::new(key.to_string())),
        }
    }

    /// Creates a provider that sends no key.
    pub fn anonymous() -> Self {
        Self { api_key: None }
    }
}

impl AuthProvider for ApiKeyAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        if let Some(key) = &self.api_key {
            headers.insert(API_KEY_HEADER.to_string(), key.expose_secret().clone());
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
