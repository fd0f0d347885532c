//! Inline actions.
//!
//! Programs do not call each other directly. They queue actions that the
//! host runs right after the queuing action, inside the same transaction.

use dm_01_manager::{PaymentError, PaymentGateway};
use parking_lot::Mutex;
use shared_types::{Action, Name, TransferArgs};
use std::sync::Arc;
use tracing::debug;

/// Actions queued by the program currently executing.
#[derive(Debug, Default)]
pub struct InlineQueue {
    pending: Mutex<Vec<Action>>,
}

impl InlineQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action.
    pub fn push(&self, action: Action) {
        debug!(action = %action.id(), "inline action queued");
        self.pending.lock().push(action);
    }

    /// Take every queued action, in queue order.
    pub fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Drop everything queued.
    pub fn clear(&self) {
        self.pending.lock().clear();
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

/// `PaymentGateway` that settles through the token program by queuing an
/// inline `transfer` authorized by the sender.
pub struct InlineTransferGateway {
    queue: Arc<InlineQueue>,
    token_account: Name,
    transfer_action: Name,
}

impl InlineTransferGateway {
    /// Gateway queuing `token_account::transfer_action`.
    pub fn new(queue: Arc<InlineQueue>, token_account: Name, transfer_action: Name) -> Self {
        Self {
            queue,
            token_account,
            transfer_action,
        }
    }
}

impl PaymentGateway for InlineTransferGateway {
    fn transfer(&self, transfer: TransferArgs) -> Result<(), PaymentError> {
        let action = Action::new(
            self.token_account.clone(),
            self.transfer_action.clone(),
            vec![transfer.from.clone()],
            &transfer,
        )
        .map_err(|e| PaymentError::Rejected(e.to_string()))?;
        self.queue.push(action);
        Ok(())
    }
}
