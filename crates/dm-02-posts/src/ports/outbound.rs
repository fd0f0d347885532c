//! # Outbound Ports
//!
//! Where accepted submissions go.

use crate::domain::{ContentRecord, StoredContent};
use parking_lot::Mutex;
use shared_types::Timestamp;
use thiserror::Error;

/// Content store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Store refused the record.
    #[error("content store rejected submission: {0}")]
    Rejected(String),
}

/// Content storage collaborator - outbound port.
pub trait ContentSink: Send + Sync {
    /// Persist an accepted submission.
    fn accept(&self, record: ContentRecord, accepted_at: Timestamp) -> Result<(), SinkError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Sink that keeps submissions in a vector.
#[derive(Default)]
pub struct MockContentSink {
    accepted: Mutex<Vec<StoredContent>>,
    /// Reject every submission?
    pub should_fail: bool,
}

impl MockContentSink {
    /// Sink that rejects everything.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Submissions accepted so far.
    pub fn accepted(&self) -> Vec<StoredContent> {
        self.accepted.lock().clone()
    }
}

impl ContentSink for MockContentSink {
    fn accept(&self, record: ContentRecord, accepted_at: Timestamp) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Rejected("mock failure".to_string()));
        }
        self.accepted.lock().push(StoredContent {
            record,
            accepted_at,
        });
        Ok(())
    }
}
