//! # Inbound Ports

use crate::domain::{ContentRecord, PostsError};
use shared_types::ExecutionContext;

/// Action names handled by the posts program.
pub mod action_names {
    /// Submit content.
    pub const POST: &str = "post";
}

/// Posts API - inbound port.
pub trait PostsApi: Send + Sync {
    /// Validate and store a content submission.
    fn submit(&self, ctx: &ExecutionContext<'_>, record: ContentRecord) -> Result<(), PostsError>;
}
