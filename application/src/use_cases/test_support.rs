//! Scripted port implementations shared by use case tests.

use crate::ports::document_ingestor::{DocumentIngestor, IngestionJob};
use crate::ports::knowledge_base::KnowledgeBase;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use kbchat_domain::{GenerationConfig, RetrievedChunk};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Gateway that replays scripted results and records every prompt.
pub(crate) struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub(crate) calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn prompt(&self, index: usize) -> String {
        self.calls.lock().unwrap()[index].0.clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), config.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Gateway whose calls never complete.
pub(crate) struct HangingGateway;

#[async_trait]
impl LlmGateway for HangingGateway {
    async fn generate(
        &self,
        _prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, GatewayError> {
        std::future::pending().await
    }
}

/// Knowledge base returning a fixed result and recording queries.
pub(crate) struct FixedKnowledgeBase {
    result: Result<Vec<RetrievedChunk>, GatewayError>,
    pub(crate) queries: Mutex<Vec<(String, String, u32)>>,
}

impl FixedKnowledgeBase {
    pub(crate) fn with_chunks(chunks: Vec<RetrievedChunk>) -> Self {
        Self {
            result: Ok(chunks),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: GatewayError) -> Self {
        Self {
            result: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl KnowledgeBase for FixedKnowledgeBase {
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<RetrievedChunk>, GatewayError> {
        self.queries.lock().unwrap().push((
            knowledge_base_id.to_string(),
            query.to_string(),
            top_k,
        ));
        self.result.clone()
    }
}

/// Ingestor with a fixed listing that records started jobs.
pub(crate) struct FakeIngestor {
    keys: Vec<String>,
    pub(crate) started: Mutex<Vec<(String, String)>>,
}

impl FakeIngestor {
    pub(crate) fn with_keys(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            started: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentIngestor for FakeIngestor {
    async fn list_documents(
        &self,
        _bucket: &str,
        prefix: &str,
    ) -> Result<Vec<String>, GatewayError> {
        Ok(self
            .keys
            .iter()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn start_ingestion(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, GatewayError> {
        self.started
            .lock()
            .unwrap()
            .push((knowledge_base_id.to_string(), data_source_id.to_string()));
        Ok(IngestionJob {
            id: "JOB123".to_string(),
            status: "STARTING".to_string(),
        })
    }
}
