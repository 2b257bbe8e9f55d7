//! Knowledge base retrieval.

use crate::config::{CallLimits, KnowledgeBaseSettings};
use crate::ports::knowledge_base::KnowledgeBase;
use crate::ports::llm_gateway::GatewayError;
use crate::use_cases::shared::call_with_limits;
use kbchat_domain::{Question, RetrievedChunk};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fetches the top-K passages for a question.
///
/// Results are returned exactly as the store ranks them: no filtering,
/// re-scoring or deduplication, and no retries.
pub struct Retriever {
    knowledge_base: Arc<dyn KnowledgeBase>,
    settings: KnowledgeBaseSettings,
    limits: CallLimits,
}

impl Retriever {
    pub fn new(
        knowledge_base: Arc<dyn KnowledgeBase>,
        settings: KnowledgeBaseSettings,
        limits: CallLimits,
    ) -> Self {
        Self {
            knowledge_base,
            settings,
            limits,
        }
    }

    pub fn settings(&self) -> &KnowledgeBaseSettings {
        &self.settings
    }

    /// Retrieve passages for a question that already passed the guard.
    ///
    /// Zero passages is `Ok(vec![])`.
    pub async fn retrieve(
        &self,
        question: &Question,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Vec<RetrievedChunk>, GatewayError> {
        let chunks = call_with_limits(
            self.knowledge_base.retrieve(
                self.settings.id(),
                question.content(),
                self.settings.top_k(),
            ),
            &self.limits,
            cancellation,
        )
        .await?;

        debug!(
            knowledge_base = self.settings.id(),
            top_k = self.settings.top_k(),
            returned = chunks.len(),
            "Retrieved passages"
        );

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::FixedKnowledgeBase;

    fn settings() -> KnowledgeBaseSettings {
        KnowledgeBaseSettings::new("YCXJT4XOV3", 3).unwrap()
    }

    #[tokio::test]
    async fn test_passes_id_query_and_top_k() {
        let kb = Arc::new(FixedKnowledgeBase::with_chunks(vec![]));
        let retriever = Retriever::new(kb.clone(), settings(), CallLimits::default());

        let question = Question::new("What is the torque?").unwrap();
        retriever.retrieve(&question, None).await.unwrap();

        let queries = kb.queries.lock().unwrap();
        assert_eq!(
            queries[0],
            ("YCXJT4XOV3".to_string(), "What is the torque?".to_string(), 3)
        );
    }

    #[tokio::test]
    async fn test_preserves_store_order() {
        let chunks = vec![
            RetrievedChunk::from_text("low").with_score(0.1),
            RetrievedChunk::from_text("high").with_score(0.9),
            RetrievedChunk::from_text("low").with_score(0.1),
        ];
        let kb = Arc::new(FixedKnowledgeBase::with_chunks(chunks.clone()));
        let retriever = Retriever::new(kb, settings(), CallLimits::default());

        let question = Question::new("q").unwrap();
        assert_eq!(retriever.retrieve(&question, None).await.unwrap(), chunks);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let kb = Arc::new(FixedKnowledgeBase::with_chunks(vec![]));
        let retriever = Retriever::new(kb, settings(), CallLimits::default());
        let question = Question::new("q").unwrap();
        assert!(retriever.retrieve(&question, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_propagates_without_retry() {
        let kb = Arc::new(FixedKnowledgeBase::failing(GatewayError::Throttled(
            "slow down".to_string(),
        )));
        let retriever = Retriever::new(kb.clone(), settings(), CallLimits::default());
        let question = Question::new("q").unwrap();

        let err = retriever.retrieve(&question, None).await.unwrap_err();
        assert!(matches!(err, GatewayError::Throttled(_)));
        assert_eq!(kb.query_count(), 1);
    }
}
