//! Retrieval domain — passages returned by the knowledge base and the
//! context block assembled from them.

pub mod chunk;
pub mod context;
