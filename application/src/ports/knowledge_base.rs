//! Knowledge base port
//!
//! Semantic retrieval against an externally managed, pre-indexed document
//! store.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use kbchat_domain::RetrievedChunk;

/// Read access to a knowledge base.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Return up to `top_k` passages for `query`, most relevant first.
    ///
    /// An empty result is `Ok(vec![])`, not an error.
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<RetrievedChunk>, GatewayError>;
}
