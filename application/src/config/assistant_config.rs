//! Assistant configuration passed into the pipeline components.
//!
//! Built once at startup from the loaded configuration file and shared
//! read-only; no component mutates it.

use super::call_limits::CallLimits;
use kbchat_domain::{DomainError, GenerationConfig};
use serde::{Deserialize, Serialize};

/// Default number of passages retrieved per question.
pub const DEFAULT_TOP_K: u32 = 3;

/// Which knowledge base to query and how many passages to request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseSettings {
    id: String,
    top_k: u32,
}

impl KnowledgeBaseSettings {
    /// Create validated settings. The id must be non-empty and `top_k` at least 1.
    pub fn new(id: impl Into<String>, top_k: u32) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidRetrieval(
                "knowledge base id is empty".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(DomainError::InvalidRetrieval(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(Self { id, top_k })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }
}

/// Prompt guard behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardSettings {
    /// Run the paid topic classification stage. The local empty check
    /// always runs.
    pub classify: bool,
    /// Subject the assistant supports, e.g. "heavy machinery".
    pub topic: String,
    /// Model parameters for the classification call.
    pub classifier: GenerationConfig,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            classify: true,
            topic: "heavy machinery".to_string(),
            classifier: GenerationConfig::classifier_defaults(),
        }
    }
}

/// Everything the question pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub knowledge_base: KnowledgeBaseSettings,
    pub guard: GuardSettings,
    /// Model parameters for the grounded answer call.
    pub answer: GenerationConfig,
    pub limits: CallLimits,
}

impl AssistantConfig {
    /// Configuration for the given knowledge base with default settings elsewhere.
    pub fn new(knowledge_base: KnowledgeBaseSettings) -> Self {
        Self {
            knowledge_base,
            guard: GuardSettings::default(),
            answer: GenerationConfig::answer_defaults(),
            limits: CallLimits::default(),
        }
    }

    pub fn with_guard(mut self, guard: GuardSettings) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_answer_config(mut self, answer: GenerationConfig) -> Self {
        self.answer = answer;
        self
    }

    pub fn with_limits(mut self, limits: CallLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Source documents and the knowledge base that ingests them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionSettings {
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub bucket: String,
    pub prefix: String,
    /// File extension of ingestible documents, without the dot.
    pub extension: String,
}
