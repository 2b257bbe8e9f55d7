//! AWS Bedrock providers
//!
//! Text generation through the Bedrock runtime `InvokeModel` API,
//! retrieval through the Bedrock agent runtime `Retrieve` API, and
//! ingestion through S3 plus the Bedrock agent `StartIngestionJob` API.
//!
//! All clients share one [`aws_config::SdkConfig`] built by
//! [`load_sdk_config`], so credentials resolve through the standard AWS
//! provider chain.

mod adapter;
mod ingestion;
mod knowledge_base;
mod model_map;
mod types;

pub use adapter::BedrockLlmGateway;
pub use ingestion::S3BedrockIngestor;
pub use knowledge_base::BedrockKnowledgeBase;
pub use model_map::{ModelFamily, model_family};

use aws_config::SdkConfig;
use tracing::debug;

/// Resolve AWS credentials and region for the Bedrock clients.
///
/// `profile` selects a named profile from the shared AWS config files;
/// `None` uses the default provider chain.
pub async fn load_sdk_config(region: &str, profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }

    debug!(region, profile = ?profile, "Loading AWS configuration");
    loader.load().await
}
