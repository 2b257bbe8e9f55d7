//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// AWS Bedrock settings shared by the runtime, agent runtime, agent and S3 clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region of the knowledge base and models (default: "us-west-2")
    pub region: String,
    /// AWS profile name for credentials (default chain when unset)
    pub profile: Option<String>,
    /// Per-call timeout in seconds for every external call; 0 disables it
    pub timeout_secs: Option<u64>,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            profile: None,
            timeout_secs: Some(60),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// AWS Bedrock settings.
    pub bedrock: FileBedrockConfig,
}
