//! Completion provider port
//!
//! Defines the interface for the reply-generating collaborator. The
//! pipeline treats it as a black box that may be slow or fail; retry and
//! timeout policy belong to the implementation, never to the pipeline.

use async_trait::async_trait;
use parley_domain::{Message, SessionId};
use thiserror::Error;

/// Errors a completion backend can surface.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Timeout")]
    Timeout,
}

/// Produces a reply given conversation context.
///
/// Implementations (adapters) live in the infrastructure layer; tests use
/// in-process doubles. `respond` is fire-and-forget from the caller's point
/// of view: no cancellation signal is ever sent, and a resolution arriving
/// after its session was abandoned is discarded by the pipeline's
/// staleness check.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply to `text` given the transcript so far.
    async fn respond(
        &self,
        session: &SessionId,
        transcript: &[Message],
        text: &str,
    ) -> Result<String, ProviderError>;
}
