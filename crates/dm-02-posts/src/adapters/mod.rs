//! # Adapters

pub mod content_log;

pub use content_log::InMemoryContentLog;
