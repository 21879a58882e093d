//! Navigation port
//!
//! Changing the active session id is a side effect owned by the surface
//! (route change, list selection, new-chat button). The core only needs the
//! contract that after `go_to` the pipeline will be re-activated for the
//! new id.

use parley_domain::SessionId;

/// Requests that `session` become the active session.
///
/// Fire-and-forget and non-fallible: a navigation request that cannot be
/// honored is dropped by the surface, never surfaced to the pipeline.
pub trait Navigator: Send + Sync {
    fn go_to(&self, session: &SessionId);
}
