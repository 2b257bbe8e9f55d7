//! Model and knowledge base providers.

pub mod bedrock;
