//! Knowledge base configuration from TOML (`[knowledge_base]` section)

use kbchat_application::config::assistant_config::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};

/// ```toml
/// [knowledge_base]
/// id = "YCXJT4XOV3"
/// data_source_id = "s3"
/// top_k = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeBaseConfig {
    /// Knowledge base id. Required.
    pub id: String,
    /// Data source to re-index on `ingest`
    pub data_source_id: String,
    /// Passages retrieved per question
    pub top_k: u32,
}

impl Default for FileKnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            data_source_id: String::new(),
            top_k: DEFAULT_TOP_K,
        }
    }
}
