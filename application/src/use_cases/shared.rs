//! Shared utilities for use cases.
//!
//! Every external call in the pipeline goes through [`call_with_limits`],
//! which applies the configured timeout and races the call against an
//! optional cancellation token.

use crate::config::CallLimits;
use crate::ports::llm_gateway::GatewayError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run an external call under the configured limits.
///
/// - Timeout elapsed → `Err(GatewayError::Timeout)`
/// - Token cancelled (before or during the call) → `Err(GatewayError::Cancelled)`
pub(crate) async fn call_with_limits<T, F>(
    call: F,
    limits: &CallLimits,
    cancellation: Option<&CancellationToken>,
) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    let limited = async {
        match limits.timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .unwrap_or_else(|_| Err(GatewayError::Timeout)),
            None => call.await,
        }
    };

    match cancellation {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(GatewayError::Cancelled),
                result = limited => result,
            }
        }
        None => limited.await,
    }
}
