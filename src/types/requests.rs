//! Request types for the Swarm API.

use serde::{Deserialize, Serialize};

/// Common view over the part requests, used by the request codec.
pub trait PartRequest: Serialize + Send + Sync {
    /// The part number being looked up.
    fn part_number(&self) -> &str;
}

/// Search part request.
///
/// # Example
///
/// ```rust
/// use swarm_client::SearchPartRequest;
///
/// let request = SearchPartRequest::new("LM358").with_mounting_type("through hole");
/// assert_eq!(request.part_number, "LM358");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPartRequest {
    /// Part number.
    pub part_number: String,
    /// Type of part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    /// Mounting type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_type: Option<String>,
}

impl SearchPartRequest {
    /// Creates a search request for a part number.
    pub fn new(part_number: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            part_type: None,
            mounting_type: None,
        }
    }

    /// Restricts the search to a part type.
    pub fn with_part_type(mut self, part_type: impl Into<String>) -> Self {
        self.part_type = Some(part_type.into());
        self
    }

    /// Restricts the search to a mounting type.
    pub fn with_mounting_type(mut self, mounting_type: impl Into<String>) -> Self {
        self.mounting_type = Some(mounting_type.into());
        self
    }
}

impl PartRequest for SearchPartRequest {
    fn part_number(&self) -> &str {
        &self.part_number
    }
}

impl From<&str> for SearchPartRequest {
    fn from(part_number: &str) -> Self {
        Self::new(part_number)
    }
}

impl From<String> for SearchPartRequest {
    fn from(part_number: String) -> Self {
        Self::new(part_number)
    }
}

/// Get part information request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartInformationRequest {
    /// Part number.
    pub part_number: String,
    /// Type of part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    /// Mounting type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_type: Option<String>,
}

impl PartInformationRequest {
    /// Creates an information request for a part number.
    pub fn new(part_number: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            part_type: None,
            mounting_type: None,
        }
    }

    /// Narrows the lookup to a part type.
    pub fn with_part_type(mut self, part_type: impl Into<String>) -> Self {
        self.part_type = Some(part_type.into());
        self
    }

    /// Narrows the lookup to a mounting type.
    pub fn with_mounting_type(mut self, mounting_type: impl Into<String>) -> Self {
        self.mounting_type = Some(mounting_type.into());
        self
    }
}

impl PartRequest for PartInformationRequest {
    fn part_number(&self) -> &str {
        &self.part_number
    }
}

impl From<&str> for PartInformationRequest {
    fn from(part_number: &str) -> Self {
        Self::new(part_number)
    }
}

impl From<String> for PartInformationRequest {
    fn from(part_number: String) -> Self {
        Self::new(part_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_conversion_matches_explicit_request() {
        let explicit = SearchPartRequest {
            part_number: "LM358".to_string(),
            part_type: None,
            mounting_type: None,
        };

        assert_eq!(SearchPartRequest::from("LM358"), explicit);
        assert_eq!(SearchPartRequest::from("LM358".to_string()), explicit);
    }

    #[test]
    fn test_info_string_conversion_matches_explicit_request() {
        let explicit = PartInformationRequest {
            part_number: "X1".to_string(),
            part_type: None,
            mounting_type: None,
        };

        assert_eq!(PartInformationRequest::from("X1"), explicit);
    }

    #[test]
    fn test_serializes_camel_case_and_omits_unset_fields() {
        let json = serde_json::to_value(SearchPartRequest::new("LM358")).unwrap();
        assert_eq!(json, serde_json::json!({ "partNumber": "LM358" }));

        let json = serde_json::to_value(
            PartInformationRequest::new("LM358")
                .with_part_type("IC")
                .with_mounting_type("SMD"),
        )
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "partNumber": "LM358", "partType": "IC", "mountingType": "SMD" })
        );
    }
}
