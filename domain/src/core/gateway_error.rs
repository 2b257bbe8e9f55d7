//! Errors from the external text-model and knowledge-base services

use thiserror::Error;

/// Errors that can occur when calling an external AI service.
///
/// Adapters map their SDK errors into these variants so use cases never
/// depend on SDK error types. The guard keeps the error in its rejection
/// reason, so a classifier outage is logged with the same `kind` as any
/// other failed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request throttled: {0}")]
    Throttled(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Short machine-readable kind for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::ConnectionError(_) => "connection",
            GatewayError::ModelNotAvailable(_) => "model_not_available",
            GatewayError::Throttled(_) => "throttled",
            GatewayError::RequestFailed(_) => "request_failed",
            GatewayError::MalformedResponse(_) => "malformed_response",
            GatewayError::Timeout => "timeout",
            GatewayError::Cancelled => "cancelled",
            GatewayError::Other(_) => "other",
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}
