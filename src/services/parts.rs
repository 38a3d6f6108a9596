//! Parts service: search and information lookup.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

use super::codec::{Endpoint, RequestCodec};
use super::pipeline;
use crate::errors::{SwarmError, SwarmResult};
use crate::observability::{MetricsCollector, RequestOutcome};
use crate::transport::{HttpTransport, TransportError};
use crate::types::{
    ApiResponse, PartInformationRequest, PartRequest, PartResults, SearchPartRequest,
    SearchPartResponse,
};

/// Parts service wiring the codec, transport and response pipeline together.
pub struct PartsService {
    transport: Arc<dyn HttpTransport>,
    codec: RequestCodec,
    metrics: Arc<dyn MetricsCollector>,
    request_timeout: Duration,
}

impl PartsService {
    /// Creates a new parts service.
    ///
    /// `request_timeout` is the value reported in [`SwarmError::Timeout`].
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        codec: RequestCodec,
        metrics: Arc<dyn MetricsCollector>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            codec,
            metrics,
            request_timeout,
        }
    }

    /// Searches parts.
    #[instrument(skip(self, request), fields(part_number = %request.part_number))]
    pub async fn search(
        &self,
        request: &SearchPartRequest,
    ) -> SwarmResult<ApiResponse<SearchPartResponse>> {
        self.execute(Endpoint::Search, request).await
    }

    /// Gets information on a part.
    #[instrument(skip(self, request), fields(part_number = %request.part_number))]
    pub async fn information(
        &self,
        request: &PartInformationRequest,
    ) -> SwarmResult<ApiResponse<PartResults>> {
        self.execute(Endpoint::Info, request).await
    }

    async fn execute<R, T>(&self, endpoint: Endpoint, request: &R) -> SwarmResult<ApiResponse<T>>
    where
        R: PartRequest,
        T: DeserializeOwned,
    {
        let http_request = self.codec.encode(endpoint, request)?;
        let operation = endpoint.operation();

        tracing::debug!(operation, path = endpoint.path(), "Sending Swarm request");
        let started = Instant::now();

        let response = match self.transport.send(http_request).await {
            Ok(response) => pipeline::parse_response(&response),
            Err(TransportError::DrainTimeout {
                status,
                headers,
                timeout,
            }) => pipeline::undrained_response(status, &headers, timeout),
            Err(e) => {
                let err = SwarmError::from_transport(e, self.request_timeout);
                let outcome = if let Some(timeout) = err.timeout() {
                    tracing::error!(
                        operation,
                        timeout_ms = timeout.as_millis() as u64,
                        "Swarm request timed out"
                    );
                    RequestOutcome::TimedOut
                } else {
                    tracing::error!(operation, error = %err, "Swarm request failed");
                    RequestOutcome::NoResponse
                };
                self.metrics
                    .record_request(operation, outcome, started.elapsed());
                return Err(err);
            }
        };

        let outcome = if response.is_throttled {
            RequestOutcome::Throttled
        } else if response.is_successful {
            RequestOutcome::Success
        } else {
            RequestOutcome::Failed
        };
        self.metrics
            .record_request(operation, outcome, started.elapsed());

        tracing::debug!(
            operation,
            status = response.status_code,
            errors = response.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Swarm response classified"
        );

        Ok(response)
    }
}

impl std::fmt::Debug for PartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartsService")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
