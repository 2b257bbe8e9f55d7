//! Ingest Documents use case
//!
//! Lists the source documents under the configured bucket prefix and
//! starts an ingestion job so the knowledge base picks them up.

use crate::config::IngestionSettings;
use crate::ports::document_ingestor::{DocumentIngestor, IngestionJob};
use crate::ports::llm_gateway::GatewayError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("No .{extension} documents found under s3://{bucket}/{prefix}")]
    NoDocuments {
        bucket: String,
        prefix: String,
        extension: String,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Input for the ingest use case
#[derive(Debug, Clone, Default)]
pub struct IngestDocumentsInput {
    /// Include every object under the prefix, not just the configured extension
    pub all_files: bool,
    /// List documents without starting a job
    pub list_only: bool,
}

/// Output of the ingest use case
#[derive(Debug, Clone, PartialEq)]
pub struct IngestDocumentsOutput {
    pub documents: Vec<String>,
    /// `None` when listing only
    pub job: Option<IngestionJob>,
}

pub struct IngestDocumentsUseCase {
    ingestor: Arc<dyn DocumentIngestor>,
    settings: IngestionSettings,
}

impl IngestDocumentsUseCase {
    pub fn new(ingestor: Arc<dyn DocumentIngestor>, settings: IngestionSettings) -> Self {
        Self { ingestor, settings }
    }

    pub async fn execute(
        &self,
        input: IngestDocumentsInput,
    ) -> Result<IngestDocumentsOutput, IngestError> {
        let keys = self
            .ingestor
            .list_documents(&self.settings.bucket, &self.settings.prefix)
            .await?;

        let documents: Vec<String> = keys
            .into_iter()
            // Folder placeholder objects
            .filter(|key| !key.ends_with('/'))
            .filter(|key| input.all_files || has_extension(key, &self.settings.extension))
            .collect();

        if documents.is_empty() {
            warn!(
                bucket = %self.settings.bucket,
                prefix = %self.settings.prefix,
                "No documents to ingest"
            );
            return Err(IngestError::NoDocuments {
                bucket: self.settings.bucket.clone(),
                prefix: self.settings.prefix.clone(),
                extension: self.settings.extension.clone(),
            });
        }

        info!("Found {} document(s) to ingest", documents.len());

        if input.list_only {
            return Ok(IngestDocumentsOutput {
                documents,
                job: None,
            });
        }

        let job = self
            .ingestor
            .start_ingestion(
                &self.settings.knowledge_base_id,
                &self.settings.data_source_id,
            )
            .await?;
        info!(job_id = %job.id, status = %job.status, "Ingestion job started");

        Ok(IngestDocumentsOutput {
            documents,
            job: Some(job),
        })
    }
}

fn has_extension(key: &str, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    key.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(wanted))
}
