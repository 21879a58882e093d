//! The active session's transcript.
//!
//! [`ConversationStore`] owns the ordered message sequence for exactly one
//! session id at a time. Switching the active id discards the previous
//! transcript; there is no implicit carry-over. Appends carry the session
//! id they originated from, and a mismatch is silently rejected; that
//! rejection is what makes discarding stale completions safe.

use crate::session::entities::Message;
use crate::session::identity::SessionId;

/// Greeting seeded into every fresh transcript.
pub const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Ordered, append-only transcript scoped to the active session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    active: Option<SessionId>,
    messages: Vec<Message>,
}

impl ConversationStore {
    /// Creates an empty store with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates `id`, seeding the transcript with a single assistant
    /// greeting. Idempotent: if the store is already active for `id`,
    /// nothing changes and `false` is returned.
    pub fn initialize(&mut self, id: SessionId, greeting: &str) -> bool {
        if self.active.as_ref() == Some(&id) {
            return false;
        }
        self.active = Some(id);
        self.messages.clear();
        self.messages.push(Message::assistant(greeting));
        true
    }

    /// Appends a message that originated in session `origin`.
    ///
    /// Rejected (no-op, `false`) when `origin` is not the active session.
    /// Not an error: a late completion from an abandoned session is an
    /// expected event, not a fault.
    pub fn append(&mut self, origin: &SessionId, message: Message) -> bool {
        if self.active.as_ref() != Some(origin) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Read-only ordered view of the transcript for rendering.
    /// Insertion order is the only valid rendering order.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// The currently active session id, if any.
    pub fn active_session(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// Drops the transcript and active id (view torn down).
    pub fn clear(&mut self) {
        self.active = None;
        self.messages.clear();
    }
}
