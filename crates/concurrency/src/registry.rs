//! Lock registry and its critical section
//!
//! The registry owns the [`LockStore`] behind a single mutex. Lock records
//! can only be reached through a [`CriticalSection`], which exists only while
//! the mutex is held, so "read outside the guard" cannot be expressed.
//!
//! ## Guard lifetime
//!
//! ```text
//! with_critical_section(work)
//!   1. try_lock_for(acquire_timeout)  -> LockUnavailable on timeout
//!   2. work(&mut section)             -> reads / writes lock records
//!   3. guard dropped                  -> on return, error, or panic
//! ```
//!
//! Callers keep the section to the lock read (or read + decision). Lookups
//! against other collaborators happen outside it so unrelated stations are
//! not serialized behind slow I/O.

use crate::config::RegistryConfig;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use rustc_hash::{FxHashMap, FxHashSet};
use stationlock_core::{Error, LockRecord, LockStore, ResourceKey, Result, UserId};
use tracing::{debug, error, warn};

/// Mutual-exclusion registry of lock records keyed by [`ResourceKey`]
pub struct LockRegistry {
    /// Lock rows; the mutex is the critical section
    store: Mutex<Box<dyn LockStore>>,
    config: RegistryConfig,
}

impl LockRegistry {
    /// Create a registry with default configuration
    pub fn new(store: impl LockStore + 'static) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    /// Create a registry with explicit configuration
    pub fn with_config(store: impl LockStore + 'static, config: RegistryConfig) -> Self {
        LockRegistry {
            store: Mutex::new(Box::new(store)),
            config,
        }
    }

    /// Registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Run `work` while holding the registry guard
    ///
    /// The guard is released on every exit path, including a panic inside
    /// `work`.
    ///
    /// # Errors
    ///
    /// - `LockUnavailable` if the guard is not acquired within the configured
    ///   timeout
    /// - any error returned by `work`
    pub fn with_critical_section<R>(
        &self,
        work: impl FnOnce(&mut CriticalSection<'_>) -> Result<R>,
    ) -> Result<R> {
        let timeout = self.config.acquire_timeout();
        let guard = self.store.try_lock_for(timeout).ok_or_else(|| {
            warn!("Lock registry critical section not acquired within {:?}", timeout);
            Error::LockUnavailable { waited: timeout }
        })?;

        let mut section = CriticalSection { store: guard };
        work(&mut section)
    }

    // ========================================================================
    // Lifecycle primitives
    //
    // Each call is one critical section. The policy of when to call them
    // belongs to the process supervising the lock lifecycle.
    // ========================================================================

    /// Claim the edit lock on `key` for `user`
    ///
    /// Returns `false` without changing anything if another user holds it.
    /// Claiming a lock the user already holds keeps the original timestamp.
    pub fn acquire_edit_lock(
        &self,
        key: &ResourceKey,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        self.with_critical_section(|section| {
            let record = section
                .get_lock(key)?
                .unwrap_or_else(|| LockRecord::new(key.clone()));

            if record.is_edit_locked_by_other(user) {
                debug!("Edit lock on {} refused for {}", key, user);
                return Ok(false);
            }
            if record.is_edit_locked_by(user) {
                return Ok(true);
            }

            debug!("Edit lock on {} granted to {}", key, user);
            section.put(LockRecord {
                edit_holder: Some(user.clone()),
                edit_locked_at: Some(at),
                ..record
            })?;
            Ok(true)
        })
    }

    /// Release the edit lock on `key` if `user` holds it
    ///
    /// Returns `false` if the lock was not held by `user`.
    pub fn release_edit_lock(&self, key: &ResourceKey, user: &UserId) -> Result<bool> {
        self.with_critical_section(|section| match section.get_lock(key)? {
            Some(record) if record.is_edit_locked_by(user) => {
                debug!("Edit lock on {} released by {}", key, user);
                section.put(LockRecord {
                    edit_holder: None,
                    edit_locked_at: None,
                    ..record
                })?;
                Ok(true)
            }
            _ => Ok(false),
        })
    }

    /// Set the operation lock on `key`, creating the record if needed
    pub fn set_operation_lock(&self, key: &ResourceKey, at: DateTime<Utc>) -> Result<()> {
        self.with_critical_section(|section| {
            let record = section
                .get_lock(key)?
                .unwrap_or_else(|| LockRecord::new(key.clone()));
            debug!("Operation lock set on {}", key);
            section.put(record.with_operation_lock(at))
        })
    }

    /// Clear the operation lock on `key`
    ///
    /// Returns `false` if it was not set.
    pub fn clear_operation_lock(&self, key: &ResourceKey) -> Result<bool> {
        self.with_critical_section(|section| match section.get_lock(key)? {
            Some(record) if record.is_operation_locked() => {
                debug!("Operation lock cleared on {}", key);
                section.put(LockRecord {
                    operation_locked_at: None,
                    ..record
                })?;
                Ok(true)
            }
            _ => Ok(false),
        })
    }
}

impl std::fmt::Debug for LockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockRegistry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Access to lock records while the registry guard is held
pub struct CriticalSection<'a> {
    store: MutexGuard<'a, Box<dyn LockStore>>,
}

impl CriticalSection<'_> {
    /// Current lock record for each key that has one
    ///
    /// Keys without a record are absent from the result.
    ///
    /// # Errors
    ///
    /// `IntegrityViolation` if the store returns more than one record for a
    /// key.
    pub fn get_locks(&self, keys: &[ResourceKey]) -> Result<FxHashMap<ResourceKey, LockRecord>> {
        // A key asked for twice is loaded once
        let mut seen = FxHashSet::with_capacity_and_hasher(keys.len(), Default::default());
        let unique: Vec<ResourceKey> = keys
            .iter()
            .filter(|key| seen.insert(*key))
            .cloned()
            .collect();

        let records = self.store.load(&unique)?;
        let mut locks =
            FxHashMap::with_capacity_and_hasher(records.len(), Default::default());

        for record in records {
            if locks.contains_key(&record.key) {
                let key = record.key;
                let count = self.store.load(std::slice::from_ref(&key))?.len();
                error!("Lock store holds {} records for {}", count, key);
                return Err(Error::IntegrityViolation {
                    key,
                    records: count,
                });
            }
            locks.insert(record.key.clone(), record);
        }
        Ok(locks)
    }

    /// Current lock record for `key`, if any
    pub fn get_lock(&self, key: &ResourceKey) -> Result<Option<LockRecord>> {
        let mut locks = self.get_locks(std::slice::from_ref(key))?;
        Ok(locks.remove(key))
    }

    /// Insert or replace the record for `record.key`
    pub fn put(&mut self, record: LockRecord) -> Result<()> {
        self.store.upsert(record)
    }

    /// Remove the record for `key`
    pub fn remove(&mut self, key: &ResourceKey) -> Result<Option<LockRecord>> {
        self.store.remove(key)
    }
}
