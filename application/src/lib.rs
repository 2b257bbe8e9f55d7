//! Application layer for kb-chat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AssistantConfig, CallLimits, GuardSettings, IngestionSettings, KnowledgeBaseSettings};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, EventKind, NoConversationLogger},
    document_ingestor::{DocumentIngestor, IngestionJob},
    knowledge_base::KnowledgeBase,
    llm_gateway::{GatewayError, LlmGateway},
    pipeline_progress::{NoPipelineProgress, PipelineProgress},
};
pub use use_cases::answer_question::Answerer;
pub use use_cases::ask_question::{AskError, AskOutput, AskQuestionUseCase};
pub use use_cases::ingest_documents::{
    IngestDocumentsInput, IngestDocumentsOutput, IngestDocumentsUseCase, IngestError,
};
pub use use_cases::prompt_guard::PromptGuard;
pub use use_cases::retrieve_context::Retriever;
