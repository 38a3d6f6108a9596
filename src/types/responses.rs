//! Response types: the wire envelopes produced by the Swarm service and the
//! uniform result returned to callers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::models::PartNumber;
use super::serde_helpers::null_as_default;

/// Search part response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPartResponse {
    /// Part information associated with searched keywords.
    #[serde(deserialize_with = "null_as_default")]
    pub parts: Vec<PartNumber>,
}

/// Wire envelope wrapping every non-throttled Swarm response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    /// Response payload.
    pub response: Option<T>,
    /// Errors declared by the service.
    pub errors: Option<Vec<String>>,
}

/// Wire body sent with HTTP 429.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleResponse {
    /// Short description of the limit hit.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Limit details.
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
}

impl ThrottleResponse {
    /// Formats the throttle payload as a single error line.
    pub fn to_error(&self) -> String {
        format!("{} {}", self.message, self.details).trim().to_string()
    }
}

/// The uniform result of every Swarm operation.
///
/// Throttling, malformed bodies and non-2xx statuses are all represented here;
/// check [`is_successful`](Self::is_successful) and
/// [`is_throttled`](Self::is_throttled) before trusting `payload`. `errors` is
/// always safe to inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Response data, if the body carried any.
    pub payload: Option<T>,
    /// True if the HTTP status was 2xx.
    pub is_successful: bool,
    /// True if the service answered HTTP 429.
    pub is_throttled: bool,
    /// Advertised backoff before retrying; zero unless throttled with a valid `Retry-After`.
    pub retry_after: Duration,
    /// The HTTP status code of the response.
    pub status_code: u16,
    /// Throttle and parse errors first, then errors declared by the service.
    pub errors: Vec<String>,
    /// The raw body, kept when it could not be recognized.
    pub raw_body: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Returns true if any errors were reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consumes the envelope, returning the payload.
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// Maps the payload, preserving the rest of the envelope.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            payload: self.payload.map(f),
            is_successful: self.is_successful,
            is_throttled: self.is_throttled,
            retry_after: self.retry_after,
            status_code: self.status_code,
            errors: self.errors,
            raw_body: self.raw_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_result_tolerates_missing_fields() {
        let result: ServiceResult<SearchPartResponse> = serde_json::from_str("{}").unwrap();
        assert!(result.response.is_none());
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_service_result_with_payload() {
        let body = concat!(
            r#"{"response":{"parts":[{"basePartNumber":"LM358","quantityAvailable":12}]},"#,
            r#""errors":[]}"#
        );
        let result: ServiceResult<SearchPartResponse> = serde_json::from_str(body).unwrap();

        let parts = result.response.unwrap().parts;
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].base_part_number.as_deref(), Some("LM358"));
        assert_eq!(parts[0].quantity_available, 12);
        assert_eq!(result.errors, Some(vec![]));
    }

    #[test]
    fn test_throttle_error_text() {
        let throttle: ThrottleResponse =
            serde_json::from_str(r#"{"message":"Too many requests","details":"limit 10/min"}"#)
                .unwrap();
        assert_eq!(throttle.to_error(), "Too many requests limit 10/min");

        let throttle: ThrottleResponse =
            serde_json::from_str(r#"{"message":"Too many requests"}"#).unwrap();
        assert_eq!(throttle.to_error(), "Too many requests");
    }

    #[test]
    fn test_throttle_null_details() {
        let throttle: ThrottleResponse =
            serde_json::from_str(r#"{"message":"Too many requests","details":null}"#).unwrap();
        assert_eq!(throttle.details, "");
        assert_eq!(throttle.to_error(), "Too many requests");
    }

    #[test]
    fn test_part_null_fields_take_defaults() {
        let body = r#"{"parts":[{"basePartNumber":"LM358","cost":null,"quantityAvailable":null,
            "keywords":null,"datasheetUrls":null,"dateCreatedUtc":null}]}"#;
        let response: SearchPartResponse = serde_json::from_str(body).unwrap();

        let part = &response.parts[0];
        assert_eq!(part.base_part_number.as_deref(), Some("LM358"));
        assert_eq!(part.cost, 0.0);
        assert_eq!(part.quantity_available, 0);
        assert!(part.keywords.is_empty());
        assert!(part.datasheet_urls.is_empty());
        assert!(part.date_created_utc.is_none());

        let empty: SearchPartResponse = serde_json::from_str(r#"{"parts":null}"#).unwrap();
        assert!(empty.parts.is_empty());
    }

    #[test]
    fn test_map_preserves_envelope() {
        let response = ApiResponse {
            payload: Some(3_u32),
            is_successful: true,
            is_throttled: false,
            retry_after: Duration::ZERO,
            status_code: 200,
            errors: vec!["advisory".to_string()],
            raw_body: None,
        };

        let mapped = response.map(|n| n * 2);
        assert_eq!(mapped.payload, Some(6));
        assert_eq!(mapped.status_code, 200);
        assert!(mapped.has_errors());
    }
}
