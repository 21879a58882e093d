//! Provider call parameters.
//!
//! [`ProviderParams`] groups the knobs a completion adapter needs: how long
//! the simulated backend defers its reply, and the bound after which an
//! outstanding call is abandoned with a timeout error. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing parameters for completion calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderParams {
    /// Artificial latency before a simulated reply is produced.
    pub reply_delay: Duration,
    /// Upper bound on a single provider call. Expiry is surfaced as a
    /// provider error, never as a hung pipeline.
    pub request_timeout: Duration,
}

impl Default for ProviderParams {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ProviderParams {
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
