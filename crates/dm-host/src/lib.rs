//! # DM Host
//!
//! In-memory execution host for the manager and posts programs.
//!
//! The host owns the tables, the clock and the transaction boundary. A
//! transaction is an ordered list of actions; either every action (and
//! every inline action they queue) succeeds, or nothing it wrote survives.
//!
//! ## Deployment
//!
//! | Account | Program | Role |
//! |---------|---------|------|
//! | `dmcy.manager` | `ManagerService` | Lists, deposits, cadence, shape checks |
//! | `dmcy.posts` | `PostsService` | Field validation, content log |
//! | `dmcy.token` | `TokenProgram` | Balances and `transfer` |
//!
//! ## Module Structure
//!
//! ```text
//! dm-host/
//! ├── config.rs       # TOML configuration
//! ├── errors.rs       # TransactionError, ConfigError
//! ├── inline.rs       # Inline queue, transfer gateway
//! ├── ledger.rs       # LedgerApi, Ledger, LedgerBuilder
//! ├── token.rs        # Payment program
//! └── transaction.rs  # Transaction, TransactionReceipt
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod errors;
pub mod inline;
pub mod ledger;
pub mod token;
pub mod transaction;

// Re-exports
pub use config::HostConfig;
pub use errors::{ConfigError, TransactionError};
pub use inline::{InlineQueue, InlineTransferGateway};
pub use ledger::{Deployment, Ledger, LedgerApi, LedgerBuilder, MAX_INLINE_DEPTH};
pub use token::{TokenError, TokenProgram};
pub use transaction::{Transaction, TransactionReceipt};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
