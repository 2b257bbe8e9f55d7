//! Ask Question use case
//!
//! Orchestrates one question through the pipeline:
//!
//! ```text
//! Validating → Classifying → Retrieving → Assembling → Generating → Done
//! ```
//!
//! Guard refusals end in `Rejected`, external call failures in `Failed`.
//! Every outcome is returned to the caller as a value; nothing here is
//! fatal to an interactive session, and nothing is retried.

use crate::config::AssistantConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, EventKind, NoConversationLogger,
};
use crate::ports::knowledge_base::KnowledgeBase;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::pipeline_progress::{NoPipelineProgress, PipelineProgress};
use crate::use_cases::answer_question::Answerer;
use crate::use_cases::prompt_guard::PromptGuard;
use crate::use_cases::retrieve_context::Retriever;
use kbchat_domain::util::log_preview;
use kbchat_domain::{
    Answer, Context, GenerationConfig, GuardDecision, PipelineState, Question, RejectionReason,
    RetrievedChunk,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a question before an answer is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AskError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Question rejected: {0}")]
    UnauthorizedTopic(RejectionReason),

    /// Classification call cancelled; an outage is `UnauthorizedTopic` instead
    #[error("Classification failed: {0}")]
    Classification(GatewayError),

    #[error("Retrieval failed: {0}")]
    Retrieval(GatewayError),

    #[error("Generation failed: {0}")]
    Generation(GatewayError),
}

impl AskError {
    /// True for guard refusals (`Rejected`), false for service failures (`Failed`)
    pub fn is_rejection(&self) -> bool {
        matches!(self, AskError::EmptyQuestion | AskError::UnauthorizedTopic(_))
    }

    /// Terminal pipeline state this error corresponds to
    pub fn terminal_state(&self) -> PipelineState {
        if self.is_rejection() {
            PipelineState::Rejected
        } else {
            PipelineState::Failed
        }
    }

    /// Check if the question was cancelled mid-call
    pub fn is_cancelled(&self) -> bool {
        match self {
            AskError::Classification(e) | AskError::Retrieval(e) | AskError::Generation(e) => {
                e.is_cancelled()
            }
            _ => false,
        }
    }

    /// The failed external call behind this error, if there was one
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            AskError::EmptyQuestion => None,
            AskError::UnauthorizedTopic(reason) => reason.service_error(),
            AskError::Classification(e) | AskError::Retrieval(e) | AskError::Generation(e) => {
                Some(e)
            }
        }
    }

    /// Short machine-readable kind for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AskError::EmptyQuestion => "validation",
            AskError::UnauthorizedTopic(RejectionReason::ServiceUnavailable(_)) => {
                "classification_service"
            }
            AskError::UnauthorizedTopic(_) => "unauthorized_topic",
            AskError::Classification(_) => "classification",
            AskError::Retrieval(_) => "retrieval",
            AskError::Generation(_) => "generation",
        }
    }
}

/// Result of a successfully answered question
#[derive(Debug, Clone, PartialEq)]
pub struct AskOutput {
    pub answer: Answer,
    /// Number of retrieved passages that contributed text to the context
    pub context_passages: usize,
    /// Distinct source locations of the retrieved passages, in retrieval order
    pub sources: Vec<String>,
}

/// Tracks the current state and reports each transition.
struct StateTracker<'a> {
    current: PipelineState,
    progress: &'a dyn PipelineProgress,
}

impl<'a> StateTracker<'a> {
    fn new(progress: &'a dyn PipelineProgress) -> Self {
        Self {
            current: PipelineState::Idle,
            progress,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.current.can_transition_to(next),
            "illegal pipeline transition {} -> {}",
            self.current,
            next
        );
        debug!(from = %self.current, to = %next, "Pipeline transition");
        self.progress.on_state_change(self.current, next);
        self.current = next;
    }
}

/// Use case for answering a single question.
///
/// Components are built from [`AssistantConfig`] at construction and shared
/// read-only, so one instance can serve any number of questions.
pub struct AskQuestionUseCase {
    guard: PromptGuard,
    retriever: Retriever,
    answerer: Answerer,
    answer_config: GenerationConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AskQuestionUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        knowledge_base: Arc<dyn KnowledgeBase>,
        config: AssistantConfig,
    ) -> Self {
        Self {
            guard: PromptGuard::new(gateway.clone(), config.guard, config.limits.clone()),
            retriever: Retriever::new(knowledge_base, config.knowledge_base, config.limits.clone()),
            answerer: Answerer::new(gateway, config.limits),
            answer_config: config.answer,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Subject the guard limits questions to
    pub fn topic(&self) -> &str {
        self.guard.topic()
    }

    /// Execute without progress reporting or cancellation
    pub async fn execute(&self, input: &str) -> Result<AskOutput, AskError> {
        self.execute_with_progress(input, &NoPipelineProgress, None)
            .await
    }

    /// Execute with progress callbacks and an optional cancellation token
    pub async fn execute_with_progress(
        &self,
        input: &str,
        progress: &dyn PipelineProgress,
        cancellation: Option<&CancellationToken>,
    ) -> Result<AskOutput, AskError> {
        let mut state = StateTracker::new(progress);
        let result = self.run(input, &mut state, progress, cancellation).await;

        if let Err(e) = &result {
            state.advance(e.terminal_state());
            self.log_error(input, e);
        }
        result
    }

    async fn run(
        &self,
        input: &str,
        state: &mut StateTracker<'_>,
        progress: &dyn PipelineProgress,
        cancellation: Option<&CancellationToken>,
    ) -> Result<AskOutput, AskError> {
        // Stage 1: local validation, no external calls
        state.advance(PipelineState::Validating);
        let question = Question::new(input).map_err(|_| AskError::EmptyQuestion)?;

        // Stage 2: topic classification
        if self.guard.classification_enabled() {
            state.advance(PipelineState::Classifying);
            match self
                .guard
                .classify_intent(question.content(), cancellation)
                .await
            {
                GuardDecision::Authorized => {}
                GuardDecision::Rejected(RejectionReason::ServiceUnavailable(e))
                    if e.is_cancelled() =>
                {
                    return Err(AskError::Classification(e));
                }
                GuardDecision::Rejected(reason) => return Err(AskError::UnauthorizedTopic(reason)),
            }
        }

        info!("Answering question: {}", log_preview(question.content(), 100));

        state.advance(PipelineState::Retrieving);
        let chunks = self
            .retriever
            .retrieve(&question, cancellation)
            .await
            .map_err(AskError::Retrieval)?;
        progress.on_chunks_retrieved(chunks.len());

        state.advance(PipelineState::Assembling);
        let context = Context::assemble(&chunks);
        if context.is_fallback() {
            warn!("No usable passages retrieved; answering with fallback context");
        }
        let sources = distinct_sources(&chunks);
        self.conversation_logger.log(ConversationEvent::new(
            EventKind::ContextRetrieved,
            serde_json::json!({
                "question": question.content(),
                "chunks": chunks.len(),
                "passages": context.passages(),
                "fallback": context.is_fallback(),
                "sources": sources,
            }),
        ));

        state.advance(PipelineState::Generating);
        let answer = self
            .answerer
            .answer(&question, &context, &self.answer_config, cancellation)
            .await
            .map_err(AskError::Generation)?;

        state.advance(PipelineState::Done);
        self.conversation_logger.log(ConversationEvent::new(
            EventKind::AnswerGenerated,
            serde_json::json!({
                "question": question.content(),
                "model": self.answer_config.model().to_string(),
                "bytes": answer.as_str().len(),
                "text": answer.as_str(),
            }),
        ));

        Ok(AskOutput {
            answer,
            context_passages: context.passages(),
            sources,
        })
    }

    fn log_error(&self, input: &str, error: &AskError) {
        let kind = if error.is_rejection() {
            EventKind::QuestionRejected
        } else {
            warn!(kind = error.kind(), "Question failed: {}", error);
            EventKind::PipelineFailed
        };
        self.conversation_logger.log(ConversationEvent::new(
            kind,
            serde_json::json!({
                "question": input,
                "kind": error.kind(),
                "cause": error.gateway_error().map(GatewayError::kind),
                "error": error.to_string(),
            }),
        ));
    }
}

fn distinct_sources(chunks: &[RetrievedChunk]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for location in chunks.iter().filter_map(|c| c.location.as_ref()) {
        if !sources.contains(location) {
            sources.push(location.clone());
        }
    }
    sources
}
