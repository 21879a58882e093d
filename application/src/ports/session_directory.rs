//! Session directory port
//!
//! Supplies the list of known sessions for browsing and creates new ones.
//! The navigation side effect that makes a freshly created session active
//! is the caller's responsibility (see [`Navigator`](super::navigator)).

use async_trait::async_trait;
use parley_domain::{SessionEntry, SessionId};
use thiserror::Error;

/// Errors from the session directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// Read/create access to the set of known sessions.
#[async_trait]
pub trait SessionDirectory: Send + Sync {
    /// Ordered session list, newest first, each entry carrying its
    /// recency group for display.
    async fn list(&self) -> Result<Vec<SessionEntry>, DirectoryError>;

    /// Create a new session and return its id.
    async fn create_session(&self) -> Result<SessionId, DirectoryError>;
}
