//! In-memory content log.
//!
//! Accepted submissions are appended under a sequence number. The log is a
//! `MemoryTable`, so the host can checkpoint it with the other tables and
//! an aborted posting transaction leaves no entry behind.

use crate::domain::{ContentRecord, StoredContent};
use crate::ports::{ContentSink, SinkError};
use shared_types::{Checkpoint, MemoryTable, Name, Table, Timestamp};
use std::sync::Arc;
use tracing::info;

/// Append-only log of accepted submissions.
#[derive(Clone)]
pub struct InMemoryContentLog {
    entries: MemoryTable<u64, StoredContent>,
}

impl InMemoryContentLog {
    /// Empty log.
    pub fn new() -> Self {
        Self {
            entries: MemoryTable::new("posts"),
        }
    }

    /// Number of accepted submissions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was accepted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All submissions in acceptance order.
    pub fn entries(&self) -> Vec<StoredContent> {
        self.entries.rows().into_iter().map(|(_, e)| e).collect()
    }

    /// Submissions of `user` in acceptance order.
    pub fn by_user(&self, user: &Name) -> Vec<StoredContent> {
        self.entries()
            .into_iter()
            .filter(|e| &e.record.user == user)
            .collect()
    }

    /// Checkpoint handle for the host.
    pub fn checkpoint_handle(&self) -> Arc<dyn Checkpoint> {
        Arc::new(self.entries.clone())
    }
}

impl Default for InMemoryContentLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSink for InMemoryContentLog {
    fn accept(&self, record: ContentRecord, accepted_at: Timestamp) -> Result<(), SinkError> {
        let seq = self.entries.len() as u64;
        info!(seq, user = %record.user, title = %record.title, "content stored");
        self.entries.insert(
            seq,
            StoredContent {
                record,
                accepted_at,
            },
        );
        Ok(())
    }
}
