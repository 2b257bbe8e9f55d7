//! Context assembly
//!
//! Merges retrieved passages into the single context block the answer
//! prompt interpolates. The result is never empty.

use super::chunk::RetrievedChunk;
use serde::{Deserialize, Serialize};

/// Separator placed between passages
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Context used when retrieval produced no usable text
pub const NO_CONTEXT_SENTINEL: &str = "No relevant context was retrieved from the knowledge base.";

/// Assembled context block (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    text: String,
    passages: usize,
}

impl Context {
    /// Assemble a context from retrieved chunks.
    ///
    /// Chunks without text are skipped. Remaining texts are joined with a
    /// blank line in retrieval order. If nothing is left, the context is
    /// [`NO_CONTEXT_SENTINEL`].
    pub fn assemble(chunks: &[RetrievedChunk]) -> Self {
        let texts: Vec<&str> = chunks
            .iter()
            .filter_map(RetrievedChunk::text_content)
            .collect();

        let joined = texts.join(CHUNK_SEPARATOR);
        if joined.is_empty() {
            return Self::fallback();
        }

        Self {
            text: joined,
            passages: texts.len(),
        }
    }

    /// The sentinel context
    pub fn fallback() -> Self {
        Self {
            text: NO_CONTEXT_SENTINEL.to_string(),
            passages: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of passages that contributed text
    pub fn passages(&self) -> usize {
        self.passages
    }

    /// True when the sentinel stands in for missing context
    pub fn is_fallback(&self) -> bool {
        self.passages == 0
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_is_passed_through() {
        let chunks = vec![RetrievedChunk::from_text("Engine torque is 450Nm")];
        let context = Context::assemble(&chunks);
        assert_eq!(context.as_str(), "Engine torque is 450Nm");
        assert_eq!(context.passages(), 1);
        assert!(!context.is_fallback());
    }

    #[test]
    fn test_chunks_joined_in_order() {
        let chunks = vec![
            RetrievedChunk::from_text("first"),
            RetrievedChunk::from_text("second"),
            RetrievedChunk::from_text("third"),
        ];
        assert_eq!(
            Context::assemble(&chunks).as_str(),
            "first\n\nsecond\n\nthird"
        );
    }

    #[test]
    fn test_empty_input_uses_sentinel() {
        let context = Context::assemble(&[]);
        assert_eq!(context.as_str(), NO_CONTEXT_SENTINEL);
        assert!(context.is_fallback());
    }

    #[test]
    fn test_chunks_without_text_are_skipped() {
        let chunks = vec![
            RetrievedChunk::default(),
            RetrievedChunk::from_text("bucket capacity 1.2m3"),
            RetrievedChunk {
                text: Some(String::new()),
                score: Some(0.4),
                ..Default::default()
            },
        ];
        let context = Context::assemble(&chunks);
        assert_eq!(context.as_str(), "bucket capacity 1.2m3");
        assert_eq!(context.passages(), 1);
    }

    #[test]
    fn test_only_textless_chunks_use_sentinel() {
        let chunks = vec![RetrievedChunk::default(), RetrievedChunk::default()];
        let context = Context::assemble(&chunks);
        assert_eq!(context.as_str(), NO_CONTEXT_SENTINEL);
        assert!(!context.as_str().is_empty());
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let chunks = vec![
            RetrievedChunk::from_text("a").with_score(0.2),
            RetrievedChunk::from_text("b").with_score(0.9),
        ];
        assert_eq!(Context::assemble(&chunks), Context::assemble(&chunks));
        // Retrieval order wins over score
        assert_eq!(Context::assemble(&chunks).as_str(), "a\n\nb");
    }
}
