//! # Adapters
//!
//! Concrete storage for the manager's tables.

pub mod memory;

pub use memory::InMemoryManagerTables;
