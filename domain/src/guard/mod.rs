//! Prompt guard domain — intent categories and authorization verdicts.
//!
//! The classifier model answers with a single category label. Parsing that
//! label is a strict allow-list: only category E authorizes a question.

pub mod verdict;
