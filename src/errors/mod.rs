//! Error types for the Swarm client.
//!
//! Only failures that leave no HTTP response to classify surface here. Throttling,
//! malformed bodies and non-2xx statuses are reported as data inside
//! [`ApiResponse`](crate::types::ApiResponse).

use std::time::Duration;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for Swarm operations.
pub type SwarmResult<T> = Result<T, SwarmError>;

/// Error type for Swarm client operations.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// Configuration error (malformed endpoint, unusable HTTP client settings).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Request validation failed before anything was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The field that caused the error.
        field: Option<String>,
    },

    /// The request could not be serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// No response was received because the connection failed.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying transport failure.
        #[source]
        source: Option<TransportError>,
    },

    /// No response was received within the configured connect or request timeout.
    #[error("Request timeout of {timeout:?} exceeded")]
    Timeout {
        /// The configured timeout that expired.
        timeout: Duration,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
}

impl SwarmError {
    /// Returns true if this error is the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SwarmError::Timeout { .. })
    }

    /// Returns the configured timeout that was exceeded, if this is a timeout.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            SwarmError::Timeout { timeout, .. } => Some(*timeout),
            _ => None,
        }
    }

    /// Creates a validation error for a field.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        SwarmError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Maps a transport failure to the error surfaced by the client.
    ///
    /// A request timeout reports `request_timeout`, the configured value, which may
    /// differ from what a custom transport observed. A connect timeout reports the
    /// connect timeout the transport applied.
    pub(crate) fn from_transport(err: TransportError, request_timeout: Duration) -> Self {
        match err {
            TransportError::Timeout { .. } => SwarmError::Timeout {
                timeout: request_timeout,
                source: err,
            },
            TransportError::ConnectTimeout { timeout, .. } => SwarmError::Timeout {
                timeout,
                source: err,
            },
            TransportError::Build { message } => SwarmError::Configuration { message },
            other => SwarmError::Network {
                message: other.to_string(),
                source: Some(other),
            },
        }
    }
}

impl From<serde_json::Error> for SwarmError {
    fn from(err: serde_json::Error) -> Self {
        SwarmError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SwarmError {
    fn from(err: url::ParseError) -> Self {
        SwarmError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
