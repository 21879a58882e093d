//! Navigation adapter for the REPL.
//!
//! The REPL has no router, so navigation is a pending-request cell: any
//! collaborator may call `go_to`, and the REPL loop drains the latest
//! request and re-activates the pipeline for it. Only the most recent
//! request survives, matching a route bar, where typing a new path
//! replaces the old one.

use parley_application::Navigator;
use parley_domain::SessionId;
use std::sync::{Mutex, PoisonError};

/// Pending-navigation cell implementing the [`Navigator`] port.
#[derive(Default)]
pub struct ReplNavigator {
    pending: Mutex<Option<SessionId>>,
}

impl ReplNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the most recent navigation request, if any.
    pub fn take_pending(&self) -> Option<SessionId> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for ReplNavigator {
    fn go_to(&self, session: &SessionId) {
        *self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
    }
}
