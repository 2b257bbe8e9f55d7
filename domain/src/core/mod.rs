//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — Bedrock text models used for classification and generation
//! - [`question::Question`] — a validated, non-empty user question
//! - [`error::DomainError`] — domain-level errors
//! - [`gateway_error::GatewayError`] — failed calls to external services

pub mod error;
pub mod gateway_error;
pub mod model;
pub mod question;
