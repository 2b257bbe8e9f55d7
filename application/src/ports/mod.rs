//! Port definitions for the application layer
//!
//! Ports define the interfaces that the application layer uses
//! to interact with external systems (AI services, storage, UI).

pub mod conversation_logger;
pub mod document_ingestor;
pub mod knowledge_base;
pub mod llm_gateway;
pub mod pipeline_progress;
