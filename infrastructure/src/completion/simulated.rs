//! Simulated completion backend.
//!
//! Defers its reply by a configurable latency, then quotes the submitted
//! text back, the way a development stand-in for the real service would.
//! Every call runs under a bounded timeout surfaced as
//! [`ProviderError::Timeout`] on expiry; the pipeline never waits forever.

use async_trait::async_trait;
use parley_application::config::ProviderParams;
use parley_application::ports::completion_provider::{CompletionProvider, ProviderError};
use parley_domain::{Message, SessionId};
use tracing::debug;

/// Deferred-reply completion provider for development and demos.
pub struct SimulatedCompletionProvider {
    params: ProviderParams,
    failure: Option<String>,
}

impl SimulatedCompletionProvider {
    /// Provider that always replies after `params.reply_delay`.
    pub fn new(params: ProviderParams) -> Self {
        Self {
            params,
            failure: None,
        }
    }

    /// Provider that always fails with `message` after the same delay.
    /// Used to drive the error path from the surface.
    pub fn failing(params: ProviderParams, message: impl Into<String>) -> Self {
        Self {
            params,
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl CompletionProvider for SimulatedCompletionProvider {
    async fn respond(
        &self,
        session: &SessionId,
        transcript: &[Message],
        text: &str,
    ) -> Result<String, ProviderError> {
        debug!(
            "session {}: generating simulated reply ({} prior messages)",
            session,
            transcript.len()
        );

        let work = async {
            tokio::time::sleep(self.params.reply_delay).await;
            match &self.failure {
                Some(message) => Err(ProviderError::Backend(message.clone())),
                None => Ok(format!(
                    "I received your message: \"{}\". As an AI model, I can process \
                     this information and respond accordingly. This is a simulated \
                     response for session {}.",
                    text, session
                )),
            }
        };

        tokio::time::timeout(self.params.request_timeout, work)
            .await
            .map_err(|_| ProviderError::Timeout)?
    }
}
