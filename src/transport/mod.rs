//! HTTP transport layer for the Swarm client.
//!
//! Provides the transport abstraction used by the services and a reqwest
//! implementation backed by a lazily built, periodically recycled connection pool.

mod http;
mod pool;

pub use self::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use pool::{ConnectionPool, PoolSettings};

use std::collections::HashMap;
use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    Build {
        /// Error message.
        message: String,
    },

    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// No response arrived within the request timeout.
    #[error("Timeout after {timeout:?}: {message}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
        /// Error message.
        message: String,
    },

    /// No connection was established within the connect timeout.
    #[error("Connect timeout after {timeout:?}: {message}")]
    ConnectTimeout {
        /// Connect timeout duration.
        timeout: Duration,
        /// Error message.
        message: String,
    },

    /// Headers arrived but the body was not read within the drain timeout.
    #[error("Response body (HTTP {status}) not drained within {timeout:?}")]
    DrainTimeout {
        /// HTTP status code of the response.
        status: u16,
        /// Response headers.
        headers: HashMap<String, String>,
        /// Drain timeout.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
