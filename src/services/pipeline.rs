//! Response pipeline: classifies a drained HTTP response into an [`ApiResponse`].
//!
//! Nothing here fails. Throttling, unrecognized bodies and error statuses all
//! become envelope data.

use http::header::RETRY_AFTER;
use http::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::observability::logging::redact_body;
use crate::transport::HttpResponse;
use crate::types::{ApiResponse, ServiceResult, ThrottleResponse};

/// Error recorded when a body does not have the expected shape.
pub fn unrecognized_response_error(status: u16) -> String {
    format!("Unrecognized response from service (HTTP {})", status)
}

/// Parses a `Retry-After` value as whole seconds. Anything else yields zero.
pub fn parse_retry_after(value: Option<&str>) -> Duration {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO)
}

fn is_success(status: u16) -> bool {
    StatusCode::from_u16(status).map_or(false, |s| s.is_success())
}

fn is_throttle(status: u16) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS.as_u16()
}

fn retry_after_header(headers: &HashMap<String, String>) -> Option<&str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(RETRY_AFTER.as_str()))
        .map(|(_, value)| value.as_str())
}

/// Classifies a response whose body was fully drained.
pub fn parse_response<T: DeserializeOwned>(response: &HttpResponse) -> ApiResponse<T> {
    let status = response.status;
    let text = response.text();

    let mut errors = Vec::new();
    let mut payload = None;
    let mut raw_body = None;
    let mut retry_after = Duration::ZERO;
    let throttled = is_throttle(status);

    if throttled {
        match serde_json::from_str::<ThrottleResponse>(&text) {
            Ok(throttle) => {
                retry_after = parse_retry_after(response.header(RETRY_AFTER.as_str()));
                errors.push(throttle.to_error());
                tracing::warn!(
                    retry_after_secs = retry_after.as_secs(),
                    message = %throttle.message,
                    "Swarm request throttled"
                );
            }
            Err(e) => {
                tracing::warn!(
                    status,
                    error = %e,
                    body = %redact_body(&text),
                    "Unrecognized throttle response"
                );
                errors.push(unrecognized_response_error(status));
                raw_body = Some(text);
            }
        }
    } else {
        match serde_json::from_str::<ServiceResult<T>>(&text) {
            Ok(result) => {
                payload = result.response;
                errors.extend(result.errors.unwrap_or_default());
            }
            Err(e) => {
                tracing::warn!(
                    status,
                    error = %e,
                    body = %redact_body(&text),
                    "Unrecognized response body"
                );
                errors.push(unrecognized_response_error(status));
                raw_body = Some(text);
            }
        }
    }

    ApiResponse {
        payload,
        is_successful: is_success(status),
        is_throttled: throttled,
        retry_after,
        status_code: status,
        errors,
        raw_body,
    }
}

/// Classifies a response whose headers arrived but whose body could not be
/// drained within `drain_timeout`.
pub fn undrained_response<T>(
    status: u16,
    headers: &HashMap<String, String>,
    drain_timeout: Duration,
) -> ApiResponse<T> {
    let throttled = is_throttle(status);
    let retry_after = if throttled {
        parse_retry_after(retry_after_header(headers))
    } else {
        Duration::ZERO
    };

    tracing::warn!(
        status,
        drain_timeout_ms = drain_timeout.as_millis() as u64,
        "Response body not drained"
    );

    ApiResponse {
        payload: None,
        is_successful: is_success(status),
        is_throttled: throttled,
        retry_after,
        status_code: status,
        errors: vec![format!(
            "Response body (HTTP {}) was not received within {:?}",
            status, drain_timeout
        )],
        raw_body: None,
    }
}
