//! Lazily built reqwest connection pool.

use reqwest::{Client, ClientBuilder};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use super::TransportError;
use crate::config::SwarmConfig;

/// Settings applied to every pool generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Overall per-request timeout.
    pub request_timeout: Duration,
    /// Maximum age of a pool generation.
    pub connection_lifetime: Duration,
}

impl From<&SwarmConfig> for PoolSettings {
    fn from(config: &SwarmConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            request_timeout: config.request_timeout,
            connection_lifetime: config.pooled_connection_lifetime,
        }
    }
}

struct Generation {
    client: Client,
    created: Instant,
    number: u64,
}

/// A reqwest client whose connections are recycled once they outlive
/// `connection_lifetime`.
///
/// reqwest only expires idle connections, so a busy connection could otherwise
/// stay pinned to one backend forever. Swapping in a fresh client lets the old
/// connections close once their in-flight requests finish.
pub struct ConnectionPool {
    settings: PoolSettings,
    current: RwLock<Generation>,
}

impl ConnectionPool {
    /// Builds the first pool generation.
    pub fn new(settings: PoolSettings) -> Result<Self, TransportError> {
        let client = build_client(&settings)?;
        tracing::debug!(
            connect_timeout_ms = settings.connect_timeout.as_millis() as u64,
            request_timeout_ms = settings.request_timeout.as_millis() as u64,
            "Swarm connection pool created"
        );

        Ok(Self {
            settings,
            current: RwLock::new(Generation {
                client,
                created: Instant::now(),
                number: 1,
            }),
        })
    }

    /// Returns a handle to the current client, rebuilding it if it has expired.
    pub fn client(&self) -> Result<Client, TransportError> {
        {
            let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
            if current.created.elapsed() < self.settings.connection_lifetime {
                return Ok(current.client.clone());
            }
        }

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have rotated while we waited for the lock.
        if current.created.elapsed() >= self.settings.connection_lifetime {
            let number = current.number + 1;
            *current = Generation {
                client: build_client(&self.settings)?,
                created: Instant::now(),
                number,
            };
            tracing::debug!(generation = number, "Swarm connection pool recycled");
        }
        Ok(current.client.clone())
    }

    /// Returns how many pool generations have been built.
    pub fn generation(&self) -> u64 {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .number
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("settings", &self.settings)
            .field("generation", &self.generation())
            .finish()
    }
}

fn build_client(settings: &PoolSettings) -> Result<Client, TransportError> {
    ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .pool_idle_timeout(settings.connection_lifetime)
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(|e| TransportError::Build {
            message: e.to_string(),
        })
}
