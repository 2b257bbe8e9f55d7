//! Bedrock knowledge base retrieval
//!
//! Implements [`KnowledgeBase`] with the agent runtime `Retrieve` API
//! using vector search.

use super::types;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagentruntime::Client as AgentRuntimeClient;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseVectorSearchConfiguration, RetrievalResultLocation,
};
use kbchat_application::ports::knowledge_base::KnowledgeBase;
use kbchat_application::ports::llm_gateway::GatewayError;
use kbchat_domain::RetrievedChunk;
use std::sync::Arc;
use tracing::debug;

pub struct BedrockKnowledgeBase {
    client: Arc<AgentRuntimeClient>,
}

impl BedrockKnowledgeBase {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Arc::new(AgentRuntimeClient::new(sdk_config)),
        }
    }
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<RetrievedChunk>, GatewayError> {
        let number_of_results = i32::try_from(top_k).map_err(|_| {
            GatewayError::RequestFailed(format!("top_k {} is out of range", top_k))
        })?;

        let retrieval_configuration = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(
                KnowledgeBaseVectorSearchConfiguration::builder()
                    .number_of_results(number_of_results)
                    .build(),
            )
            .build();

        debug!(knowledge_base_id, top_k, "Calling Bedrock Retrieve");

        let response = self
            .client
            .retrieve()
            .knowledge_base_id(knowledge_base_id)
            .retrieval_query(KnowledgeBaseQuery::builder().text(query).build())
            .retrieval_configuration(retrieval_configuration)
            .send()
            .await
            .map_err(|e| types::convert_sdk_error("Bedrock knowledge base", &e))?;

        Ok(response
            .retrieval_results()
            .iter()
            .map(convert_retrieval_result)
            .collect())
    }
}

/// Convert one retrieval result to a domain chunk, keeping store order.
///
/// Results without text content (images, table rows) carry `text: None`.
fn convert_retrieval_result(result: &KnowledgeBaseRetrievalResult) -> RetrievedChunk {
    RetrievedChunk {
        text: result
            .content()
            .map(|c| c.text().to_string()),
        score: result.score(),
        location: result.location().and_then(location_uri),
        metadata: result
            .metadata()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), types::document_to_json(v)))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn location_uri(location: &RetrievalResultLocation) -> Option<String> {
    location
        .s3_location()
        .and_then(|s3| s3.uri())
        .or_else(|| location.web_location().and_then(|web| web.url()))
        .map(str::to_string)
}
