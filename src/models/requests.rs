//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for tag invalidation (DELETE /cache/tags)
///
/// # Fields
/// - `tags`: labels whose entries should be removed from the store
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateTagsRequest {
    /// Tags to invalidate
    pub tags: Vec<String>,
}

impl InvalidateTagsRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.tags.is_empty() {
            return Some("At least one tag is required".to_string());
        }
        if self.tags.iter().any(|t| t.is_empty()) {
            return Some("Tags cannot be empty strings".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_tags_deserialize() {
        let json = r#"{"tags": ["products", "orders"]}"#;
        let req: InvalidateTagsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.tags, vec!["products".to_string(), "orders".to_string()]);
    }

    #[test]
    fn test_validate_empty_list() {
        let req = InvalidateTagsRequest { tags: vec![] };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_empty_tag() {
        let req = InvalidateTagsRequest {
            tags: vec!["products".to_string(), "".to_string()],
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = InvalidateTagsRequest {
            tags: vec!["products".to_string()],
        };
        assert!(req.validate().is_none());
    }
}
