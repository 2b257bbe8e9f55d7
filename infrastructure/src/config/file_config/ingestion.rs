//! Document ingestion configuration from TOML (`[ingestion]` section)

use serde::{Deserialize, Serialize};

/// ```toml
/// [ingestion]
/// bucket = "bedrock-kb-documents"
/// prefix = "spec-sheets/"
/// extension = "pdf"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIngestionConfig {
    /// S3 bucket holding the source documents
    pub bucket: String,
    /// Key prefix ("folder") of the source documents
    pub prefix: String,
    /// Extension of ingestible documents, without the dot
    pub extension: String,
}

impl Default for FileIngestionConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            prefix: "spec-sheets/".to_string(),
            extension: "pdf".to_string(),
        }
    }
}
