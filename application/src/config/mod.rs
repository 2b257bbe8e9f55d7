//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`CallLimits`] — per-call timeout for external service calls
//! - [`AssistantConfig`] — everything the question pipeline needs, passed
//!   into each component at construction
//! - [`IngestionSettings`] — where source documents live and which
//!   knowledge base ingests them

pub mod assistant_config;
pub mod call_limits;

pub use assistant_config::{AssistantConfig, GuardSettings, IngestionSettings, KnowledgeBaseSettings};
pub use call_limits::CallLimits;
