//! Swarm API client.
//!
//! Provides the main client interface for interacting with the Swarm API.

use std::sync::Arc;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::SwarmConfig;
use crate::errors::SwarmResult;
use crate::observability::{DefaultMetricsCollector, MetricsCollector, RequestMetrics};
use crate::services::{PartsService, RequestCodec};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{
    ApiResponse, PartInformationRequest, PartResults, SearchPartRequest, SearchPartResponse,
};

/// The main Swarm client.
///
/// Cheap to share behind an `Arc`: every clone of the handle uses the same
/// connection pool, which is built on the first call and dropped with the client.
///
/// # Example
///
/// ```rust,no_run
/// use swarm_client::SwarmClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SwarmClient::default();
///
///     let response = client.search_parts("LM358").await?;
///     if response.is_throttled {
///         println!("retry in {:?}", response.retry_after);
///     } else if let Some(results) = response.payload {
///         println!("{} parts", results.parts.len());
///     }
///     Ok(())
/// }
/// ```
pub struct SwarmClient {
    config: SwarmConfig,
    parts_service: PartsService,
    metrics: Arc<dyn MetricsCollector>,
}

impl SwarmClient {
    /// Creates a client for the given configuration.
    pub fn new(config: SwarmConfig) -> Self {
        let transport = Arc::new(ReqwestTransport::new(&config));
        Self::assemble(config, transport, None, None)
    }

    /// Creates a new client builder.
    pub fn builder() -> SwarmClientBuilder {
        SwarmClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`SwarmConfig::from_env`].
    pub fn from_env() -> SwarmResult<Self> {
        Ok(Self::new(SwarmConfig::from_env()?))
    }

    fn assemble(
        config: SwarmConfig,
        transport: Arc<dyn HttpTransport>,
        auth: Option<Arc<dyn AuthProvider>>,
        metrics: Option<Arc<dyn MetricsCollector>>,
    ) -> Self {
        let auth = auth.unwrap_or_else(|| Arc::new(ApiKeyAuth::new(config.api_key())));
        let metrics = metrics.unwrap_or_else(|| Arc::new(DefaultMetricsCollector::new()));

        let parts_service = PartsService::new(
            transport,
            RequestCodec::new(auth),
            Arc::clone(&metrics),
            config.request_timeout,
        );

        Self {
            config,
            parts_service,
            metrics,
        }
    }

    /// Searches parts.
    ///
    /// Accepts a bare part number or a full [`SearchPartRequest`]. Throttling and
    /// error statuses are reported in the returned envelope; only a missing
    /// response is an `Err`.
    pub async fn search_parts(
        &self,
        request: impl Into<SearchPartRequest>,
    ) -> SwarmResult<ApiResponse<SearchPartResponse>> {
        self.parts_service.search(&request.into()).await
    }

    /// Gets information on a part.
    ///
    /// Accepts a bare part number or a full [`PartInformationRequest`].
    pub async fn get_part_information(
        &self,
        request: impl Into<PartInformationRequest>,
    ) -> SwarmResult<ApiResponse<PartResults>> {
        self.parts_service.information(&request.into()).await
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Returns a snapshot of the request metrics.
    pub fn metrics(&self) -> RequestMetrics {
        self.metrics.get_metrics()
    }
}

impl Default for SwarmClient {
    fn default() -> Self {
        Self::new(SwarmConfig::default())
    }
}

impl std::fmt::Debug for SwarmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwarmClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Swarm client.
#[derive(Default)]
pub struct SwarmClientBuilder {
    config: Option<SwarmConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
}

impl SwarmClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: SwarmConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets a custom metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the client. No connection is opened until the first call.
    pub fn build(self) -> SwarmClient {
        let config = self.config.unwrap_or_default();
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(&config)),
        };

        SwarmClient::assemble(config, transport, self.auth, self.metrics)
    }
}
