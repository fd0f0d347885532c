//! # Domain Value Objects
//!
//! Immutable value types for the manager program.

use serde::{Deserialize, Serialize};
use shared_types::{Name, Timestamp};

/// Absolute action positions of a posting transaction.
///
/// Accepted sequences are `[submit][validate]` for whitelisted users and
/// `[submit][validate][payment]` for everyone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionShape {
    /// Position of the posts program's submission.
    pub submit_index: usize,
    /// Position of the manager's `validatepost`.
    pub validate_index: usize,
    /// Position of the deposit transfer.
    pub payment_index: usize,
}

impl TransactionShape {
    /// First position that must be empty when a deposit is paid.
    pub fn after_payment(&self) -> usize {
        self.payment_index + 1
    }

    /// True if the submission opens the transaction and every later slot
    /// directly follows the previous one, so no position goes unchecked.
    pub fn is_contiguous(&self) -> bool {
        self.submit_index == 0
            && self.validate_index == self.submit_index + 1
            && self.payment_index == self.validate_index + 1
    }
}

impl Default for TransactionShape {
    fn default() -> Self {
        Self {
            submit_index: 0,
            validate_index: 1,
            payment_index: 2,
        }
    }
}

/// Which branch of post validation a user took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostPath {
    /// Whitelisted: no deposit required.
    Exempt,
    /// Not whitelisted: deposit taken into escrow.
    Deposit,
}

/// Key of an escrowed deposit, partitioned by owner.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepositKey {
    /// Depositor.
    pub owner: Name,
    /// Creation time, unique per owner.
    pub created_at: Timestamp,
}

impl DepositKey {
    /// Build a key.
    pub fn new(owner: Name, created_at: Timestamp) -> Self {
        Self { owner, created_at }
    }

    /// Lowest and highest possible key of `owner`'s deposits.
    pub fn owner_bounds(owner: &Name) -> (Self, Self) {
        (
            Self::new(owner.clone(), Timestamp(0)),
            Self::new(owner.clone(), Timestamp(u64::MAX)),
        )
    }
}
