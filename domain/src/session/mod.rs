//! Session domain.
//!
//! - [`identity::SessionId`]: opaque token identifying a session
//! - [`entities::Message`]: a single message within a transcript
//! - [`entities::SessionEntry`]: browsable session metadata
//! - [`transcript::ConversationStore`]: the active session's transcript

pub mod entities;
pub mod identity;
pub mod transcript;
