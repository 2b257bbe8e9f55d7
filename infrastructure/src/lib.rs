//! Infrastructure layer for kb-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::bedrock::{
    BedrockKnowledgeBase, BedrockLlmGateway, S3BedrockIngestor, load_sdk_config,
};
