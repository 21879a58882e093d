//! Domain layer for parley
//!
//! This crate contains the core conversation entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A logical conversation identified by an opaque token. Sessions carry
//! identity and metadata only; the transcript itself is ephemeral and
//! scoped to whichever session is currently active.
//!
//! ## Transcript
//!
//! The ordered, append-only sequence of messages belonging to one session,
//! owned by [`session::transcript::ConversationStore`].

pub mod session;
pub mod util;

// Re-export commonly used types
pub use session::{
    entities::{Message, RecencyGroup, Role, SessionEntry},
    identity::{MessageId, SessionId},
    transcript::{ConversationStore, DEFAULT_GREETING},
};
