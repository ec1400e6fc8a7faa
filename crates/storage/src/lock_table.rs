//! Lock rows backing the lock registry
//!
//! Rows are grouped per key in a `SmallVec` with one inline slot: a healthy
//! table never holds more than one row per key, so lookups never allocate.
//! [`LockTable::insert_row`] bypasses the per-key replacement and models a
//! store without a unique constraint on the key.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use stationlock_core::{LockRecord, LockStore, ResourceKey, Result};

type Rows = SmallVec<[LockRecord; 1]>;

/// In-memory lock rows keyed by [`ResourceKey`]
#[derive(Debug, Default)]
pub struct LockTable {
    rows: FxHashMap<ResourceKey, Rows>,
}

impl LockTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row without replacing existing rows for the same key
    pub fn insert_row(&mut self, record: LockRecord) {
        self.rows.entry(record.key.clone()).or_default().push(record);
    }

    /// Total number of rows
    pub fn len(&self) -> usize {
        self.rows.values().map(|rows| rows.len()).sum()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl LockStore for LockTable {
    fn load(&self, keys: &[ResourceKey]) -> Result<Vec<LockRecord>> {
        Ok(keys
            .iter()
            .filter_map(|key| self.rows.get(key))
            .flat_map(|rows| rows.iter().cloned())
            .collect())
    }

    fn upsert(&mut self, record: LockRecord) -> Result<()> {
        let mut rows = Rows::new();
        let key = record.key.clone();
        rows.push(record);
        self.rows.insert(key, rows);
        Ok(())
    }

    fn remove(&mut self, key: &ResourceKey) -> Result<Option<LockRecord>> {
        Ok(self.rows.remove(key).and_then(|rows| rows.into_iter().next()))
    }
}
