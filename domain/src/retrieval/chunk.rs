//! Retrieved chunk value object

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A passage returned by the knowledge base for a query.
///
/// Order within a result set is the store's relevance ranking; nothing in
/// the pipeline re-ranks or filters it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Passage text. Non-text results (images, table rows) carry `None`.
    pub text: Option<String>,
    /// Relevance score reported by the store
    pub score: Option<f64>,
    /// Source document location (e.g. an S3 URI)
    pub location: Option<String>,
    /// Arbitrary source metadata attached at ingestion
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl RetrievedChunk {
    /// Create a chunk carrying only text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Text content, if the chunk carries any non-empty text
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let chunk = RetrievedChunk::from_text("Engine torque is 450Nm");
        assert_eq!(chunk.text_content(), Some("Engine torque is 450Nm"));
        assert!(chunk.score.is_none());
        assert!(chunk.metadata.is_empty());
    }

    #[test]
    fn test_empty_text_has_no_content() {
        let chunk = RetrievedChunk {
            text: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(chunk.text_content(), None);
        assert_eq!(RetrievedChunk::default().text_content(), None);
    }

    #[test]
    fn test_builders() {
        let chunk = RetrievedChunk::from_text("x")
            .with_score(0.87)
            .with_location("s3://bucket/spec-sheets/excavator.pdf")
            .with_metadata("page", serde_json::json!(4));
        assert_eq!(chunk.score, Some(0.87));
        assert_eq!(
            chunk.location.as_deref(),
            Some("s3://bucket/spec-sheets/excavator.pdf")
        );
        assert_eq!(chunk.metadata["page"], 4);
    }
}
