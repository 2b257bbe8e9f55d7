//! Document ingestion port
//!
//! Lists the source documents behind a knowledge base and asks the
//! knowledge base service to (re)index them.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An ingestion job started by the knowledge base service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionJob {
    pub id: String,
    pub status: String,
}

#[async_trait]
pub trait DocumentIngestor: Send + Sync {
    /// List object keys under `prefix` in `bucket`.
    async fn list_documents(&self, bucket: &str, prefix: &str)
    -> Result<Vec<String>, GatewayError>;

    /// Start an ingestion job for one data source of a knowledge base.
    async fn start_ingestion(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, GatewayError>;
}
