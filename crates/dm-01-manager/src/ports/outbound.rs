//! # Outbound Ports
//!
//! Tables the manager reads and writes, and the payment collaborator that
//! settles refunds.

use crate::domain::{BlacklistEntry, CadenceRecord, Deposit, DepositKey, WhitelistEntry};
use parking_lot::Mutex;
use shared_types::{Name, Table, TransferArgs};
use std::sync::Arc;
use thiserror::Error;

/// Table handles used by the manager, one per entity type.
#[derive(Clone)]
pub struct ManagerTables {
    /// Deposit exemptions.
    pub whitelist: Arc<dyn Table<Name, WhitelistEntry>>,
    /// Blocked users.
    pub blacklist: Arc<dyn Table<Name, BlacklistEntry>>,
    /// Escrowed deposits, partitioned by owner.
    pub deposits: Arc<dyn Table<DepositKey, Deposit>>,
    /// Posting cadence per user.
    pub cadence: Arc<dyn Table<Name, CadenceRecord>>,
}

/// Payment collaborator failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Transfer refused.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Payment collaborator - outbound port.
///
/// Moves value out of the manager. Settlement is not the manager's concern.
pub trait PaymentGateway: Send + Sync {
    /// Issue a transfer.
    fn transfer(&self, transfer: TransferArgs) -> Result<(), PaymentError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Payment gateway that records transfers instead of settling them.
#[derive(Default)]
pub struct MockPaymentGateway {
    sent: Mutex<Vec<TransferArgs>>,
    /// Reject every transfer?
    pub should_fail: bool,
}

impl MockPaymentGateway {
    /// Gateway that rejects every transfer.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Transfers issued so far.
    pub fn sent(&self) -> Vec<TransferArgs> {
        self.sent.lock().clone()
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn transfer(&self, transfer: TransferArgs) -> Result<(), PaymentError> {
        if self.should_fail {
            return Err(PaymentError::Rejected("mock failure".to_string()));
        }
        self.sent.lock().push(transfer);
        Ok(())
    }
}
