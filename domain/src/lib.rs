//! Domain layer for kb-chat
//!
//! This crate contains the value objects and pure policies of the
//! question-answering pipeline. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Guard verdicts**: the classifier's answer is parsed with a strict
//!   allow-list; only an on-topic verdict lets a question through.
//! - **Context assembly**: retrieved passages are joined in retrieval order,
//!   with a fixed sentinel when nothing usable came back.
//! - **Pipeline state**: the legal transitions a question may take from
//!   `Idle` to `Done`, `Rejected` or `Failed`.

pub mod config;
pub mod core;
pub mod generation;
pub mod guard;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;
pub mod util;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError, gateway_error::GatewayError, model::Model, question::Question,
};
pub use generation::{answer::Answer, config::GenerationConfig};
pub use guard::verdict::{ClassificationVerdict, GuardDecision, IntentCategory, RejectionReason};
pub use pipeline::state::PipelineState;
pub use prompt::PromptTemplate;
pub use retrieval::{
    chunk::RetrievedChunk,
    context::{CHUNK_SEPARATOR, Context, NO_CONTEXT_SENTINEL},
};
