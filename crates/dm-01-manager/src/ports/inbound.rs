//! # Inbound Ports
//!
//! What the manager program can do, and the argument shapes of its actions.

use crate::domain::{
    BlacklistEntry, CadenceRecord, Deposit, ManagerError, PostPath, WhitelistEntry,
};
use serde::{Deserialize, Serialize};
use shared_types::{ExecutionContext, Name, Timestamp};

/// Action names handled by the manager.
pub mod action_names {
    /// Insert or update a whitelist entry.
    pub const UPSERT_WHITELIST: &str = "upsertwl";
    /// Delete a whitelist entry.
    pub const ERASE_WHITELIST: &str = "erasewl";
    /// Insert or update a blacklist entry.
    pub const UPSERT_BLACKLIST: &str = "upsertbl";
    /// Delete a blacklist entry.
    pub const ERASE_BLACKLIST: &str = "erasebl";
    /// Forfeit a deposit.
    pub const SEIZE_DEPOSIT: &str = "seizedeposit";
    /// Return a deposit to its owner.
    pub const REFUND: &str = "refund";
    /// Delete the caller's cadence record.
    pub const CLOSE_USER: &str = "closeuser";
    /// Validate a posting transaction.
    pub const VALIDATE_POST: &str = "validatepost";
}

/// `upsertwl` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertWhitelistArgs {
    /// User to exempt.
    pub user: Name,
    /// Display name.
    pub display_name: String,
}

/// `upsertbl` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertBlacklistArgs {
    /// User to block.
    pub user: Name,
    /// Listing time.
    pub time: Timestamp,
}

/// Arguments of actions that only name a user: `erasewl`, `erasebl`,
/// `closeuser`, `validatepost`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserArgs {
    /// Subject user.
    pub user: Name,
}

/// `seizedeposit` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeizeDepositArgs {
    /// Depositor.
    pub user: Name,
    /// Deposit creation time.
    pub time: Timestamp,
    /// Informational, never stored.
    pub reason: String,
}

/// `refund` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundArgs {
    /// Depositor.
    pub user: Name,
    /// Deposit creation time.
    pub deposit_time: Timestamp,
}

/// Manager API - inbound port.
pub trait ManagerApi: Send + Sync {
    /// Insert or update a whitelist entry. Administrator only.
    fn upsert_whitelist(
        &self,
        ctx: &ExecutionContext<'_>,
        user: Name,
        display_name: String,
    ) -> Result<(), ManagerError>;

    /// Delete a whitelist entry. Administrator only.
    fn erase_whitelist(&self, ctx: &ExecutionContext<'_>, user: &Name) -> Result<(), ManagerError>;

    /// Insert or update a blacklist entry. Administrator only.
    fn upsert_blacklist(
        &self,
        ctx: &ExecutionContext<'_>,
        user: Name,
        time: Timestamp,
    ) -> Result<(), ManagerError>;

    /// Delete a blacklist entry. Administrator only.
    fn erase_blacklist(&self, ctx: &ExecutionContext<'_>, user: &Name) -> Result<(), ManagerError>;

    /// Forfeit a deposit. Administrator only.
    fn seize_deposit(
        &self,
        ctx: &ExecutionContext<'_>,
        user: &Name,
        time: Timestamp,
        reason: &str,
    ) -> Result<(), ManagerError>;

    /// Return a deposit to its owner after the time-lock.
    fn refund(
        &self,
        ctx: &ExecutionContext<'_>,
        user: &Name,
        deposit_time: Timestamp,
    ) -> Result<(), ManagerError>;

    /// Delete the caller's cadence record once the posting delay elapsed.
    fn close_user(&self, ctx: &ExecutionContext<'_>, user: &Name) -> Result<(), ManagerError>;

    /// Validate the enclosing posting transaction.
    fn validate_post(&self, ctx: &ExecutionContext<'_>, user: &Name)
        -> Result<PostPath, ManagerError>;

    /// Whitelist entry of `user`.
    fn whitelist_entry(&self, user: &Name) -> Option<WhitelistEntry>;

    /// Blacklist entry of `user`.
    fn blacklist_entry(&self, user: &Name) -> Option<BlacklistEntry>;

    /// True if `user` is exempt from the deposit.
    fn is_whitelisted(&self, user: &Name) -> bool {
        self.whitelist_entry(user).is_some()
    }

    /// True if `user` is blocked.
    fn is_blacklisted(&self, user: &Name) -> bool {
        self.blacklist_entry(user).is_some()
    }

    /// Deposits held for `user`, oldest first.
    fn deposits_of(&self, user: &Name) -> Vec<Deposit>;

    /// Cadence record of `user`.
    fn cadence_of(&self, user: &Name) -> Option<CadenceRecord>;
}
