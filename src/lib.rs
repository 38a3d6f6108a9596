//! Swarm Client Library
//!
//! An async Rust client for the Swarm electronic parts lookup API. Provides part
//! search and part information lookup, and normalizes every HTTP outcome,
//! including rate limiting, into a uniform [`ApiResponse`].
//!
//! # Features
//!
//! - **Uniform results**: throttling, malformed bodies and error statuses are data, not errors
//! - **Throttle aware**: `429` responses carry the advertised `Retry-After` backoff
//! - **Pooled connections**: one lazily built connection pool per client, recycled periodically
//! - **Timeouts**: connect, request and body-drain timeouts; a request timeout is the
//!   only hard failure
//! - **Observability**: `tracing` spans and events, per-call metrics
//!
//! The client never retries. Callers own the backoff policy.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use swarm_client::{SwarmClient, SwarmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SwarmClient::new(SwarmConfig::with_api_key("your_api_key"));
//!
//!     let response = client.get_part_information("LM358").await?;
//!     if response.is_throttled {
//!         tokio::time::sleep(response.retry_after).await;
//!     } else if response.is_successful {
//!         for part in response.payload.map(|r| r.parts).unwrap_or_default() {
//!             println!("{:?}: {:?}", part.base_part_number, part.supplier);
//!         }
//!     } else {
//!         for error in &response.errors {
//!             eprintln!("{}", error);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{SwarmClient, SwarmClientBuilder};
pub use config::{SwarmConfig, SwarmConfigBuilder};
pub use errors::{SwarmError, SwarmResult};

pub use types::{
    ApiResponse, PartInformationRequest, PartNumber, PartResults, SearchPartRequest,
    SearchPartResponse,
};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
