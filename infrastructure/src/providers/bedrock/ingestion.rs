//! Knowledge base ingestion
//!
//! Implements [`DocumentIngestor`]: source documents are listed from S3 and
//! indexing is started with the Bedrock agent `StartIngestionJob` API.

use super::types;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagent::Client as AgentClient;
use aws_sdk_bedrockagent::types::IngestionJob as SdkIngestionJob;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use kbchat_application::ports::document_ingestor::{DocumentIngestor, IngestionJob};
use kbchat_application::ports::llm_gateway::GatewayError;
use tracing::debug;

pub struct S3BedrockIngestor {
    s3: S3Client,
    agent: AgentClient,
}

impl S3BedrockIngestor {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            s3: S3Client::new(sdk_config),
            agent: AgentClient::new(sdk_config),
        }
    }
}

#[async_trait]
impl DocumentIngestor for S3BedrockIngestor {
    async fn list_documents(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<String>, GatewayError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let page = self
                .s3
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| types::convert_sdk_error("S3", &e))?;

            keys.extend(page_keys(&page));

            continuation_token = next_page_token(&page);
            if continuation_token.is_none() {
                break;
            }
        }

        debug!(bucket, prefix, count = keys.len(), "Listed S3 objects");
        Ok(keys)
    }

    async fn start_ingestion(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, GatewayError> {
        let response = self
            .agent
            .start_ingestion_job()
            .knowledge_base_id(knowledge_base_id)
            .data_source_id(data_source_id)
            .send()
            .await
            .map_err(|e| types::convert_sdk_error("Bedrock agent", &e))?;

        response
            .ingestion_job()
            .map(convert_ingestion_job)
            .ok_or_else(|| {
                GatewayError::MalformedResponse("StartIngestionJob returned no job".to_string())
            })
    }
}

/// Object keys on one listing page, in listing order
fn page_keys(page: &ListObjectsV2Output) -> impl Iterator<Item = String> + '_ {
    page.contents()
        .iter()
        .filter_map(|object| object.key())
        .map(str::to_string)
}

/// Token for the next page; `None` once the listing is complete.
fn next_page_token(page: &ListObjectsV2Output) -> Option<String> {
    match page.next_continuation_token() {
        Some(token) if page.is_truncated() == Some(true) => Some(token.to_string()),
        _ => None,
    }
}

fn convert_ingestion_job(job: &SdkIngestionJob) -> IngestionJob {
    IngestionJob {
        id: job.ingestion_job_id().to_string(),
        status: job.status().as_str().to_string(),
    }
}
