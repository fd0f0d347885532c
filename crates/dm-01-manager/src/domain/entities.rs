//! # Domain Entities
//!
//! Rows of the manager's tables and the program configuration.

use super::errors::ConfigError;
use super::value_objects::TransactionShape;
use serde::{Deserialize, Serialize};
use shared_types::{ActionId, Asset, Name, Symbol, Timestamp};
use std::time::Duration;

/// Exempts a user from the posting deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    /// Whitelisted user.
    pub user: Name,
    /// Display name shown for the user.
    pub display_name: String,
}

/// Blocks a user from posting and from refunds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    /// Blacklisted user.
    pub user: Name,
    /// Administrator supplied time of the listing.
    pub time: Timestamp,
}

/// Escrowed posting deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Creation time (the post's transaction time).
    pub created_at: Timestamp,
    /// Amount held.
    pub quantity: Asset,
}

/// Per-user posting cadence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceRecord {
    /// Owner.
    pub user: Name,
    /// Time of the last accepted post.
    pub last_action: Timestamp,
    /// Reserved, always empty.
    pub ext: String,
}

impl CadenceRecord {
    /// Fresh record for a first post.
    pub fn new(user: Name, last_action: Timestamp) -> Self {
        Self {
            user,
            last_action,
            ext: String::new(),
        }
    }

    /// Earliest time the next post (or close) is allowed.
    pub fn next_allowed(&self, min_delay: Duration) -> Timestamp {
        self.last_action.saturating_add(min_delay)
    }
}

/// Manager program configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Account the manager runs as; deposits are paid to it.
    pub account: Name,
    /// Administrative principal for registry mutation and seizure.
    pub admin: Name,
    /// Posts program account.
    pub posts_account: Name,
    /// Posts program submission action.
    pub post_action: Name,
    /// Payment program account.
    pub token_account: Name,
    /// Payment program transfer action.
    pub transfer_action: Name,
    /// Exact deposit required from non-whitelisted users.
    pub deposit: Asset,
    /// Minimum delay between two posts of one user (10 minutes).
    pub post_min_delay: Duration,
    /// Time-lock on deposit refunds (48 hours).
    pub refund_delay: Duration,
    /// Positions of the posting transaction.
    pub shape: TransactionShape,
}

impl ManagerConfig {
    /// Identity of the content submission action.
    pub fn submit_action(&self) -> ActionId {
        ActionId {
            account: self.posts_account.clone(),
            name: self.post_action.clone(),
        }
    }

    /// Identity of the payment transfer action.
    pub fn payment_action(&self) -> ActionId {
        ActionId {
            account: self.token_account.clone(),
            name: self.transfer_action.clone(),
        }
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.deposit.is_positive() {
            return Err(ConfigError::NonPositiveDeposit(self.deposit.clone()));
        }
        if !self.shape.is_contiguous() {
            return Err(ConfigError::InvalidShape {
                submit: self.shape.submit_index,
                validate: self.shape.validate_index,
                payment: self.shape.payment_index,
            });
        }
        Ok(())
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        let account = Name::from_static("dmcy.manager");
        Self {
            admin: account.clone(),
            account,
            posts_account: Name::from_static("dmcy.posts"),
            post_action: Name::from_static("post"),
            token_account: Name::from_static("dmcy.token"),
            transfer_action: Name::from_static("transfer"),
            deposit: Asset::new(50_000, Symbol::from_static(4, "TLOS")), // 5.0000 TLOS
            post_min_delay: Duration::from_secs(10 * 60),
            refund_delay: Duration::from_secs(48 * 3600),
            shape: TransactionShape::default(),
        }
    }
}
