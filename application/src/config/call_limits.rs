//! Limits applied to every external service call.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-call limits for classification, retrieval and generation calls.
///
/// A call that exceeds `timeout` fails with
/// [`GatewayError::Timeout`](crate::ports::llm_gateway::GatewayError::Timeout).
/// `None` leaves the transport client's own timeout in charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallLimits {
    /// Maximum time to wait for one external call.
    pub timeout: Option<Duration>,
}

impl CallLimits {
    /// Creates limits with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates limits from an optional timeout in seconds.
    ///
    /// `None` and `Some(0)` both disable the timeout.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}
