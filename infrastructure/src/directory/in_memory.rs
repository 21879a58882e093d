//! In-memory session directory.
//!
//! Holds session records for the lifetime of the process. Listing orders
//! records newest first and attaches a recency group computed from elapsed
//! time, so the surface can render grouped headers without date math.

use async_trait::async_trait;
use parley_application::ports::session_directory::{DirectoryError, SessionDirectory};
use parley_domain::util::current_timestamp_millis;
use parley_domain::{RecencyGroup, SessionEntry, SessionId};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

const HOUR_MILLIS: u64 = 60 * 60 * 1000;

const NEW_SESSION_TITLE: &str = "New Conversation";

#[derive(Debug, Clone)]
struct SessionRecord {
    id: SessionId,
    title: String,
    last_active_millis: u64,
}

/// Process-lifetime session directory.
pub struct InMemorySessionDirectory {
    records: Mutex<Vec<SessionRecord>>,
}

impl InMemorySessionDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Directory seeded with a small browsable history, spread across
    /// recency buckets.
    pub fn seeded() -> Self {
        let now = current_timestamp_millis();
        let seed = [
            ("React Component Help", now.saturating_sub(2 * HOUR_MILLIS)),
            ("Explain Quantum Physics", now.saturating_sub(30 * HOUR_MILLIS)),
            ("Dinner Recipes", now.saturating_sub(3 * 24 * HOUR_MILLIS)),
        ];

        Self {
            records: Mutex::new(
                seed.into_iter()
                    .map(|(title, last_active_millis)| SessionRecord {
                        id: SessionId::generate(),
                        title: title.to_string(),
                        last_active_millis,
                    })
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<SessionRecord>>, DirectoryError> {
        self.records
            .lock()
            .map_err(|_| DirectoryError::Unavailable("session records poisoned".to_string()))
    }
}

impl Default for InMemorySessionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionDirectory for InMemorySessionDirectory {
    async fn list(&self) -> Result<Vec<SessionEntry>, DirectoryError> {
        let now = current_timestamp_millis();
        let mut records = self.lock()?.clone();
        records.sort_by(|a, b| b.last_active_millis.cmp(&a.last_active_millis));

        Ok(records
            .into_iter()
            .map(|r| {
                let recency = RecencyGroup::classify(r.last_active_millis, now);
                SessionEntry::new(r.id, r.title, recency)
            })
            .collect())
    }

    async fn create_session(&self) -> Result<SessionId, DirectoryError> {
        let id = SessionId::generate();
        self.lock()?.push(SessionRecord {
            id: id.clone(),
            title: NEW_SESSION_TITLE.to_string(),
            last_active_millis: current_timestamp_millis(),
        });

        info!("created session {}", id);
        Ok(id)
    }
}
