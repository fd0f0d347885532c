//! Transactions and receipts.

use serde::{Deserialize, Serialize};
use shared_types::{Action, CodecError, Name, Timestamp};

/// An ordered list of actions applied atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Actions in execution order.
    pub actions: Vec<Action>,
}

impl Transaction {
    /// Transaction from prepared actions.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Append an action, encoding `args`.
    pub fn with_action<T: Serialize>(
        mut self,
        account: Name,
        name: Name,
        authorization: Vec<Name>,
        args: &T,
    ) -> Result<Self, CodecError> {
        self.actions
            .push(Action::new(account, name, authorization, args)?);
        Ok(self)
    }

    /// Number of top-level actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if the transaction has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Outcome of a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Commit sequence number, starting at 1.
    pub sequence: u64,
    /// Trusted time the transaction executed at.
    pub executed_at: Timestamp,
    /// Top-level actions executed.
    pub actions: usize,
    /// Inline actions executed.
    pub inline_actions: usize,
}
