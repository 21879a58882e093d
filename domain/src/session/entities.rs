//! Session domain entities

use crate::session::identity::{MessageId, SessionId};
use crate::util::current_timestamp_millis;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation.
///
/// `Error` marks a failed completion surfaced in the transcript so the
/// user can see it and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
    Error,
}

/// A message in a conversation (Entity). Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Creation time, milliseconds since the unix epoch.
    pub created_at: u64,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
            created_at: current_timestamp_millis(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Error, content)
    }
}

/// Recency bucket for the session list.
///
/// Classified from elapsed time rather than calendar dates to avoid
/// timezone dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecencyGroup {
    Today,
    Yesterday,
    PreviousWeek,
    Older,
}

const DAY_MILLIS: u64 = 24 * 60 * 60 * 1000;

impl RecencyGroup {
    /// Classify a last-activity timestamp against "now".
    pub fn classify(last_active_millis: u64, now_millis: u64) -> Self {
        let age = now_millis.saturating_sub(last_active_millis);
        if age < DAY_MILLIS {
            RecencyGroup::Today
        } else if age < DAY_MILLIS * 2 {
            RecencyGroup::Yesterday
        } else if age < DAY_MILLIS * 7 {
            RecencyGroup::PreviousWeek
        } else {
            RecencyGroup::Older
        }
    }

    /// Display label for group headers.
    pub fn label(&self) -> &'static str {
        match self {
            RecencyGroup::Today => "Today",
            RecencyGroup::Yesterday => "Yesterday",
            RecencyGroup::PreviousWeek => "Previous 7 Days",
            RecencyGroup::Older => "Older",
        }
    }

    /// All groups in display order, newest first.
    pub fn display_order() -> [RecencyGroup; 4] {
        [
            RecencyGroup::Today,
            RecencyGroup::Yesterday,
            RecencyGroup::PreviousWeek,
            RecencyGroup::Older,
        ]
    }
}

impl std::fmt::Display for RecencyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Browsable session metadata (Entity).
///
/// Identity and labels only; a `SessionEntry` never carries a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub id: SessionId,
    pub title: String,
    pub recency: RecencyGroup,
}

impl SessionEntry {
    pub fn new(id: SessionId, title: impl Into<String>, recency: RecencyGroup) -> Self {
        Self {
            id,
            title: title.into(),
            recency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_role() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").role, Role::Assistant);
        assert_eq!(Message::error("boom").role, Role::Error);
    }

    #[test]
    fn messages_get_distinct_ids() {
        let a = Message::user("one");
        let b = Message::user("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn recency_classification_buckets() {
        let now = DAY_MILLIS * 30;
        assert_eq!(RecencyGroup::classify(now, now), RecencyGroup::Today);
        assert_eq!(
            RecencyGroup::classify(now - DAY_MILLIS + 1, now),
            RecencyGroup::Today
        );
        assert_eq!(
            RecencyGroup::classify(now - DAY_MILLIS, now),
            RecencyGroup::Yesterday
        );
        assert_eq!(
            RecencyGroup::classify(now - DAY_MILLIS * 3, now),
            RecencyGroup::PreviousWeek
        );
        assert_eq!(
            RecencyGroup::classify(now - DAY_MILLIS * 8, now),
            RecencyGroup::Older
        );
    }

    #[test]
    fn recency_classification_tolerates_future_timestamps() {
        // Clock skew: a record stamped slightly ahead of "now" is Today.
        assert_eq!(RecencyGroup::classify(2000, 1000), RecencyGroup::Today);
    }

    #[test]
    fn recency_labels() {
        assert_eq!(RecencyGroup::PreviousWeek.label(), "Previous 7 Days");
        assert_eq!(RecencyGroup::Today.to_string(), "Today");
    }
}
