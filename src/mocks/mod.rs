//! Mock implementations for testing.
//!
//! Provides a mock transport for unit testing without making real API calls.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path.
    pub path: String,
    /// Request body.
    pub body: Vec<u8>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    /// Parses the recorded body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a response with a raw body.
    pub fn body(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    /// Creates a 200 response wrapping `value` in a service envelope.
    pub fn envelope<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::json!({ "response": value, "errors": [] });
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body: serde_json::to_vec(&body).unwrap_or_default(),
        }
    }

    /// Creates a 429 response.
    pub fn throttled(message: &str, details: &str, retry_after_secs: u64) -> Self {
        let body = serde_json::json!({ "message": message, "details": details });
        Self::body(429, &body.to_string()).with_header("Retry-After", &retry_after_secs.to_string())
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<MockResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Queues a transport failure.
    pub fn queue_error(&self, error: TransportError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Sets the response used once the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_response(&self) -> Result<MockResponse, TransportError> {
        if let Some(response) = lock(&self.responses).pop_front() {
            return response;
        }
        Ok(lock(&self.default_response)
            .clone()
            .unwrap_or_else(|| MockResponse::body(500, "No mock response configured")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            path: request.path,
            body: request.body,
            headers: request.headers,
        });

        let response = self.next_response()?;
        Ok(HttpResponse {
            status: response.status,
            headers: response.headers,
            body: Bytes::from(response.body),
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Test fixtures for common response types.
pub mod fixtures {
    use crate::types::{PartNumber, PartResults, SearchPartResponse};

    /// Creates a part record.
    pub fn part(base_part_number: &str, quantity_available: i64) -> PartNumber {
        PartNumber {
            base_part_number: Some(base_part_number.to_string()),
            manufacturer: Some("Texas Instruments".to_string()),
            manufacturer_part_number: Some(format!("{}DR", base_part_number)),
            description: Some("Dual operational amplifier".to_string()),
            part_type: Some("IC".to_string()),
            supplier: Some("DigiKey".to_string()),
            cost: 0.42,
            currency: Some("USD".to_string()),
            quantity_available,
            keywords: vec!["op amp".to_string()],
            datasheet_urls: vec![format!("https://www.ti.com/lit/ds/{}.pdf", base_part_number)],
            ..PartNumber::default()
        }
    }

    /// Creates a search response.
    pub fn search_response(parts: &[&str]) -> SearchPartResponse {
        SearchPartResponse {
            parts: parts.iter().map(|p| part(p, 100)).collect(),
        }
    }

    /// Creates part information results.
    pub fn part_results(parts: &[&str]) -> PartResults {
        PartResults {
            parts: parts.iter().map(|p| part(p, 100)).collect(),
        }
    }
}
