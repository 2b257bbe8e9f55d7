//! LLM Gateway port
//!
//! Defines the interface for invoking text models. Both the topic
//! classifier and the answer generator go through this port.

use async_trait::async_trait;
use kbchat_domain::GenerationConfig;
pub use kbchat_domain::GatewayError;

/// Gateway for text generation
///
/// Implementations (adapters) live in the infrastructure layer and are
/// responsible for extracting the text of the first returned candidate.
/// A response without that text is [`GatewayError::MalformedResponse`].
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Invoke the model named in `config` with a single prompt.
    async fn generate(&self, prompt: &str, config: &GenerationConfig)
    -> Result<String, GatewayError>;
}
