//! # Table Seam
//!
//! Plain key-value tables, one per entity type. Programs receive handles
//! implementing `Table<K, V>`; the host owns the concrete storage and can
//! checkpoint it to discard the writes of an aborted transaction.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key-value table port.
pub trait Table<K, V>: Send + Sync {
    /// Row stored under `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// True if a row exists under `key`.
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace; returns the previous row.
    fn insert(&self, key: K, value: V) -> Option<V>;

    /// Delete; returns the removed row.
    fn remove(&self, key: &K) -> Option<V>;

    /// All rows in key order.
    fn rows(&self) -> Vec<(K, V)>;

    /// Rows with keys in `from..=to`, in key order. Empty if `from > to`.
    fn range(&self, from: &K, to: &K) -> Vec<(K, V)>;
}

/// Saved table contents that can be written back.
pub trait Restore: Send {
    /// Overwrite the live table with the saved contents.
    fn restore(self: Box<Self>);
}

/// Storage that can be snapshotted before a transaction runs.
pub trait Checkpoint: Send + Sync {
    /// Capture the current contents.
    fn checkpoint(&self) -> Box<dyn Restore>;
}

/// In-memory ordered table.
///
/// Clones are handles to the same rows.
pub struct MemoryTable<K, V> {
    name: &'static str,
    rows: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K: Ord, V> MemoryTable<K, V> {
    /// Create an empty table.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Table name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// True if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl<K, V> Clone for MemoryTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<K, V> Table<K, V> for MemoryTable<K, V>
where
    K: Ord + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.rows.read().get(key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        self.rows.read().contains_key(key)
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        self.rows.write().insert(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.rows.write().remove(key)
    }

    fn rows(&self) -> Vec<(K, V)> {
        self.rows
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn range(&self, from: &K, to: &K) -> Vec<(K, V)> {
        if from > to {
            return Vec::new();
        }
        self.rows
            .read()
            .range(from..=to)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

struct MemorySnapshot<K, V> {
    target: Arc<RwLock<BTreeMap<K, V>>>,
    rows: BTreeMap<K, V>,
}

impl<K: Send + Sync, V: Send + Sync> Restore for MemorySnapshot<K, V> {
    fn restore(self: Box<Self>) {
        let snapshot = *self;
        *snapshot.target.write() = snapshot.rows;
    }
}

impl<K, V> Checkpoint for MemoryTable<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn checkpoint(&self) -> Box<dyn Restore> {
        tracing::trace!(table = self.name, "checkpoint");
        Box::new(MemorySnapshot {
            target: Arc::clone(&self.rows),
            rows: self.rows.read().clone(),
        })
    }
}
