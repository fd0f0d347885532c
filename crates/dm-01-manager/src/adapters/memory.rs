//! In-memory manager tables.

use crate::domain::{BlacklistEntry, CadenceRecord, Deposit, DepositKey, WhitelistEntry};
use crate::ports::ManagerTables;
use shared_types::{Checkpoint, MemoryTable, Name};
use std::sync::Arc;

/// The four manager tables backed by `MemoryTable`.
#[derive(Clone)]
pub struct InMemoryManagerTables {
    /// Whitelist.
    pub whitelist: MemoryTable<Name, WhitelistEntry>,
    /// Blacklist.
    pub blacklist: MemoryTable<Name, BlacklistEntry>,
    /// Deposits.
    pub deposits: MemoryTable<DepositKey, Deposit>,
    /// Cadence records.
    pub cadence: MemoryTable<Name, CadenceRecord>,
}

impl InMemoryManagerTables {
    /// Empty tables.
    pub fn new() -> Self {
        Self {
            whitelist: MemoryTable::new("whitelist"),
            blacklist: MemoryTable::new("blacklist"),
            deposits: MemoryTable::new("deposits"),
            cadence: MemoryTable::new("userinfo"),
        }
    }

    /// Handles for the manager service. They share rows with `self`.
    pub fn tables(&self) -> ManagerTables {
        ManagerTables {
            whitelist: Arc::new(self.whitelist.clone()),
            blacklist: Arc::new(self.blacklist.clone()),
            deposits: Arc::new(self.deposits.clone()),
            cadence: Arc::new(self.cadence.clone()),
        }
    }

    /// Checkpoint handles for the host.
    pub fn checkpoints(&self) -> Vec<Arc<dyn Checkpoint>> {
        let whitelist: Arc<dyn Checkpoint> = Arc::new(self.whitelist.clone());
        let blacklist: Arc<dyn Checkpoint> = Arc::new(self.blacklist.clone());
        let deposits: Arc<dyn Checkpoint> = Arc::new(self.deposits.clone());
        let cadence: Arc<dyn Checkpoint> = Arc::new(self.cadence.clone());
        vec![whitelist, blacklist, deposits, cadence]
    }
}

impl Default for InMemoryManagerTables {
    fn default() -> Self {
        Self::new()
    }
}
