//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_question;
pub mod ask_question;
pub mod ingest_documents;
pub mod prompt_guard;
pub mod retrieve_context;
pub(crate) mod shared;

#[cfg(test)]
mod test_support;
