//! Request codec: turns typed part requests into HTTP requests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::errors::{SwarmError, SwarmResult};
use crate::transport::HttpRequest;
use crate::types::PartRequest;

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Swarm API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Part search.
    Search,
    /// Part information lookup.
    Info,
}

impl Endpoint {
    /// Path of the endpoint, relative to the configured base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "part/search",
            Endpoint::Info => "part/info",
        }
    }

    /// Operation name used in logs and metrics.
    pub const fn operation(self) -> &'static str {
        match self {
            Endpoint::Search => "search_parts",
            Endpoint::Info => "get_part_information",
        }
    }
}

/// Serializes part requests and attaches headers.
pub struct RequestCodec {
    auth: Arc<dyn AuthProvider>,
}

impl RequestCodec {
    /// Creates a codec that authenticates with `auth`.
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    /// Builds the POST request for `endpoint`.
    pub fn encode<R: PartRequest>(
        &self,
        endpoint: Endpoint,
        request: &R,
    ) -> SwarmResult<HttpRequest> {
        if request.part_number().trim().is_empty() {
            return Err(SwarmError::validation_field(
                "Part number is required",
                "partNumber",
            ));
        }

        let body = serde_json::to_vec(request)?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        self.auth.apply_auth(&mut headers);

        Ok(HttpRequest {
            path: endpoint.path().to_string(),
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for RequestCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCodec").finish()
    }
}
