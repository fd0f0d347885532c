//! # DM-01 Manager
//!
//! Gatekeeper for content submission: reputation lists, deposit escrow,
//! posting cadence and the shape of posting transactions.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Actions
//!
//! | Action | Authority | Effect |
//! |--------|-----------|--------|
//! | `upsertwl` | admin | Insert or update a whitelist entry |
//! | `erasewl` | admin | Delete a whitelist entry |
//! | `upsertbl` | admin | Insert or update a blacklist entry |
//! | `erasebl` | admin | Delete a blacklist entry |
//! | `seizedeposit` | admin | Forfeit a deposit to the protocol |
//! | `refund` | user | Return a deposit after 48 hours |
//! | `closeuser` | user | Delete the cadence record after 10 minutes |
//! | `validatepost` | user | Gate a posting transaction |
//!
//! ## Posting Transaction Shape
//!
//! ```text
//! whitelisted:  [posts::post] [manager::validatepost]
//! everyone else: [posts::post] [manager::validatepost] [token::transfer 5.0000 TLOS]
//! ```
//!
//! Blacklisted users are rejected before the whitelist is consulted.
//!
//! ## Module Structure
//!
//! ```text
//! dm-01-manager/
//! ├── domain/          # Entries, deposits, cadence, config, errors
//! ├── algorithms/      # Shape, cadence and escrow rules
//! ├── ports/           # ManagerApi, ManagerTables, PaymentGateway
//! ├── adapters/        # In-memory tables
//! └── service.rs       # ManagerService (Program impl)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryManagerTables;
pub use algorithms::{
    advance_cadence, check_close_allowed, check_no_payment_slot, check_nothing_after_payment,
    check_refund_unlocked, check_submission_precedes, check_validator_position,
    expect_deposit_transfer,
};
pub use domain::{
    invariant_delay_elapsed, invariant_deposit_transfer, BlacklistEntry, CadenceRecord,
    ConfigError, Deposit, DepositKey, ManagerConfig, ManagerError, PostPath, ShapeViolation,
    TransactionShape, WhitelistEntry,
};
pub use ports::{
    action_names, ManagerApi, ManagerTables, MockPaymentGateway, PaymentError, PaymentGateway,
    RefundArgs, SeizeDepositArgs, UpsertBlacklistArgs, UpsertWhitelistArgs, UserArgs,
};
pub use service::ManagerService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
