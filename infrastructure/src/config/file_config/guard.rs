//! Prompt guard configuration from TOML (`[guard]` section)

use kbchat_application::config::GuardSettings;
use serde::{Deserialize, Serialize};

/// ```toml
/// [guard]
/// classify = true
/// topic = "heavy machinery"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGuardConfig {
    /// Run the topic classifier before retrieval
    pub classify: bool,
    /// Subject the assistant answers questions about
    pub topic: String,
}

impl Default for FileGuardConfig {
    fn default() -> Self {
        let defaults = GuardSettings::default();
        Self {
            classify: defaults.classify,
            topic: defaults.topic,
        }
    }
}
