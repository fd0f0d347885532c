//! # Shared Types Crate
//!
//! Protocol primitives shared by both ledger programs and the execution host.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: names, assets and the action envelope are
//!   defined once and used by every program.
//! - **Injected Context**: programs never reach for ambient globals; the
//!   executing action, its verified authorization, the trusted timestamp and
//!   the sibling actions of the transaction arrive in an `ExecutionContext`.
//! - **Explicit Tables**: one logical table per entity type, passed in as a
//!   handle implementing `Table<K, V>`.

#![warn(missing_docs)]

pub mod action;
pub mod clock;
pub mod context;
pub mod entities;
pub mod errors;
pub mod program;
pub mod store;

pub use action::{Action, ActionId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{ExecutionContext, TransactionView};
pub use entities::*;
pub use errors::*;
pub use program::Program;
pub use store::{Checkpoint, MemoryTable, Restore, Table};
