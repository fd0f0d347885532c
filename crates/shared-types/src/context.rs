//! # Execution Context
//!
//! Everything a program may learn about the action it is executing:
//! who it runs as, the verified authorities, the trusted transaction time
//! and a read-only view of its sibling actions.

use crate::action::Action;
use crate::entities::{Name, Timestamp};
use crate::errors::AuthError;
use std::fmt;

/// Ordered, read-only view of the actions of the current transaction.
///
/// Indices are absolute positions in the transaction as submitted.
pub trait TransactionView {
    /// Action at `index`, if any.
    fn action(&self, index: usize) -> Option<&Action>;

    /// Number of actions.
    fn len(&self) -> usize;

    /// True if the transaction has no actions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Existence check. Never decodes the payload.
    fn contains(&self, index: usize) -> bool {
        index < self.len()
    }
}

impl TransactionView for [Action] {
    fn action(&self, index: usize) -> Option<&Action> {
        self.get(index)
    }

    fn len(&self) -> usize {
        <[Action]>::len(self)
    }
}

impl TransactionView for Vec<Action> {
    fn action(&self, index: usize) -> Option<&Action> {
        self.get(index)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Invocation context handed to `Program::apply`.
pub struct ExecutionContext<'a> {
    receiver: Name,
    index: usize,
    now: Timestamp,
    authorization: &'a [Name],
    transaction: &'a dyn TransactionView,
}

impl<'a> ExecutionContext<'a> {
    /// Create a context for the action at `index` executed by `receiver`.
    pub fn new(
        receiver: Name,
        index: usize,
        now: Timestamp,
        authorization: &'a [Name],
        transaction: &'a dyn TransactionView,
    ) -> Self {
        Self {
            receiver,
            index,
            now,
            authorization,
            transaction,
        }
    }

    /// Account of the executing program.
    pub fn receiver(&self) -> &Name {
        &self.receiver
    }

    /// Position of the executing action. For inline actions this is the
    /// position of the top-level action that spawned them.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Trusted transaction timestamp.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Sibling actions of the enclosing transaction.
    pub fn transaction(&self) -> &'a dyn TransactionView {
        self.transaction
    }

    /// True if the action carries `account`'s authority.
    pub fn has_auth(&self, account: &Name) -> bool {
        self.authorization.contains(account)
    }

    /// Fail unless the action carries `account`'s authority.
    pub fn require_auth(&self, account: &Name) -> Result<(), AuthError> {
        if self.has_auth(account) {
            Ok(())
        } else {
            Err(AuthError::MissingAuthority {
                required: account.clone(),
            })
        }
    }
}

impl fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("receiver", &self.receiver)
            .field("index", &self.index)
            .field("now", &self.now)
            .field("authorization", &self.authorization)
            .field("transaction_len", &self.transaction.len())
            .finish()
    }
}
