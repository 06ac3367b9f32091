//! Core data types shared by the extractor, aggregator, and service.

use serde::{Deserialize, Serialize};

/// Maximum number of tag suggestions in a bundle.
pub const MAX_TAGS: usize = 15;
/// Maximum number of action suggestions in a bundle.
pub const MAX_ACTIONS: usize = 15;
/// Maximum number of metric suggestions in a bundle.
pub const MAX_METRICS: usize = 10;
/// Maximum number of pattern suggestions in a bundle.
pub const MAX_PATTERNS: usize = 10;

/// Categorised writing hints for one field of one entry.
///
/// Serialised as `{ "tags": [], "actions": [], "metrics": [], "patterns": [] }`.
/// Each category holds unique strings in first-discovery order and never
/// exceeds its cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionBundle {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl SuggestionBundle {
    /// A bundle with all four categories empty ("nothing typed yet").
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.actions.is_empty()
            && self.metrics.is_empty()
            && self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bundle_serializes_all_categories() {
        let json = serde_json::to_value(SuggestionBundle::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tags": [], "actions": [], "metrics": [], "patterns": [] })
        );
    }

    #[test]
    fn test_field_order_in_output() {
        let text = serde_json::to_string(&SuggestionBundle::empty()).unwrap();
        let tags = text.find("tags").unwrap();
        let actions = text.find("actions").unwrap();
        let metrics = text.find("metrics").unwrap();
        let patterns = text.find("patterns").unwrap();
        assert!(tags < actions && actions < metrics && metrics < patterns);
    }

    #[test]
    fn test_missing_categories_deserialize_empty() {
        let bundle: SuggestionBundle = serde_json::from_str(r#"{"tags":["redis"]}"#).unwrap();
        assert_eq!(bundle.tags, vec!["redis"]);
        assert!(bundle.actions.is_empty());
        assert!(!bundle.is_empty());
    }
}
