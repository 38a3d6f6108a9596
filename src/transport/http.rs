//! HTTP transport implementation.

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;

use super::{ConnectionPool, PoolSettings, TransportError};
use crate::config::SwarmConfig;

/// HTTP request representation. Every Swarm call is a POST.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request path, relative to the endpoint.
    pub path: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Creates a new POST request with an empty body.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header regardless of the case it was stored with.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and drain the full response body.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
///
/// The connection pool is built on the first `send`, at most once per transport,
/// and shared by every concurrent caller afterwards.
pub struct ReqwestTransport {
    config: SwarmConfig,
    settings: PoolSettings,
    drain_timeout: Duration,
    pool: OnceCell<ConnectionPool>,
}

impl ReqwestTransport {
    /// Creates a transport for the given configuration. No sockets are opened yet.
    pub fn new(config: &SwarmConfig) -> Self {
        Self {
            config: config.clone(),
            settings: PoolSettings::from(config),
            drain_timeout: config.response_drain_timeout,
            pool: OnceCell::new(),
        }
    }

    /// Returns true once the connection pool has been built.
    pub fn is_initialized(&self) -> bool {
        self.pool.get().is_some()
    }

    /// Returns the connection pool, building it on first use.
    pub fn pool(&self) -> Result<&ConnectionPool, TransportError> {
        self.pool.get_or_try_init(|| ConnectionPool::new(self.settings))
    }

    fn map_send_error(&self, err: &reqwest::Error) -> TransportError {
        classify_send_error(
            &self.settings,
            err.is_timeout(),
            err.is_connect(),
            err.to_string(),
        )
    }
}

/// reqwest flags a connect timeout as both a timeout and a connect error.
fn classify_send_error(
    settings: &PoolSettings,
    timed_out: bool,
    connect: bool,
    message: String,
) -> TransportError {
    match (timed_out, connect) {
        (true, true) => TransportError::ConnectTimeout {
            timeout: settings.connect_timeout,
            message,
        },
        (true, false) => TransportError::Timeout {
            timeout: settings.request_timeout,
            message,
        },
        (false, true) => TransportError::Connection { message },
        (false, false) => TransportError::InvalidResponse { message },
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = self.pool()?.client()?;
        let url = self.config.endpoint_url(&request.path);

        let mut req_builder = client.post(&url);
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }
        req_builder = req_builder.body(request.body);

        let response = req_builder
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|value| (k.as_str().to_ascii_lowercase(), value.to_string()))
            })
            .collect();

        let body = match tokio::time::timeout(self.drain_timeout, response.bytes()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => return Err(self.map_send_error(&e)),
            Err(_) => {
                return Err(TransportError::DrainTimeout {
                    status,
                    headers,
                    timeout: self.drain_timeout,
                })
            }
        };

        tracing::trace!(status, body_len = body.len(), "Swarm response drained");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("endpoint", &self.config.endpoint().as_str())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_lazy() {
        let transport = ReqwestTransport::new(&SwarmConfig::default());
        assert!(!transport.is_initialized());

        transport.pool().unwrap();
        assert!(transport.is_initialized());
    }

    #[test]
    fn test_pool_built_once_under_concurrent_first_use() {
        let transport = ReqwestTransport::new(&SwarmConfig::default());

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| transport.pool().map(|pool| pool as *const _ as usize)))
                .collect();
            let addresses: Vec<usize> = handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect();
            assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        });
    }

    #[test]
    fn test_connect_timeout_reports_connect_duration() {
        let settings = PoolSettings {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
            connection_lifetime: Duration::from_secs(900),
        };

        match classify_send_error(&settings, true, true, "timed out".to_string()) {
            TransportError::ConnectTimeout { timeout, .. } => {
                assert_eq!(timeout, Duration::from_secs(2));
            }
            other => panic!("Expected ConnectTimeout, got {other:?}"),
        }
        match classify_send_error(&settings, true, false, "timed out".to_string()) {
            TransportError::Timeout { timeout, .. } => {
                assert_eq!(timeout, Duration::from_secs(5));
            }
            other => panic!("Expected Timeout, got {other:?}"),
        }
        assert!(matches!(
            classify_send_error(&settings, false, true, "refused".to_string()),
            TransportError::Connection { .. }
        ));
        assert!(matches!(
            classify_send_error(&settings, false, false, "bad frame".to_string()),
            TransportError::InvalidResponse { .. }
        ));
    }

    #[tokio::test]
    async fn test_stalled_body_hits_drain_timeout() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 429 Too Many Requests\r\nRetry-After: 3\r\n\
                      Content-Length: 64\r\n\r\n{\"message\"",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut config = SwarmConfig::with_endpoint("key", &format!("http://{addr}")).unwrap();
        config.request_timeout = Duration::from_secs(5);
        config.response_drain_timeout = Duration::from_millis(200);
        let transport = ReqwestTransport::new(&config);

        let result = transport.send(HttpRequest::post("part/info")).await;

        match result {
            Err(TransportError::DrainTimeout {
                status,
                headers,
                timeout,
            }) => {
                assert_eq!(status, 429);
                assert_eq!(headers.get("retry-after").map(String::as_str), Some("3"));
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("Expected DrainTimeout, got {other:?}"),
        }
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "12".to_string());
        let response = HttpResponse {
            status: 429,
            headers,
            body: Bytes::new(),
        };

        assert_eq!(response.header("Retry-After"), Some("12"));
        assert!(!response.is_success());
    }
}
