//! # DM-02 Posts
//!
//! Content submission program. A post is accepted only when the manager's
//! `validatepost` runs in the same transaction and every field is within
//! bounds.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Field Bounds (defaults)
//!
//! | Field | Rule |
//! |-------|------|
//! | title | 10 < len < 200 |
//! | uri | 50 < len < 2000, starts with `magnet:` |
//! | size | > 0 |
//! | content_type | len < 50 |
//! | description | len < 2000 |
//!
//! Lengths are byte lengths.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryContentLog;
pub use domain::{
    check_fields, invariant_strictly_between, ContentLimits, ContentRecord, FieldViolation,
    PostsConfig, PostsError, StoredContent,
};
pub use ports::{action_names, ContentSink, MockContentSink, PostsApi, SinkError};
pub use service::PostsService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
