//! Collaborator traits
//!
//! The resolver owns no data. Everything it reads comes through these
//! traits, which external systems (or the in-memory stores in
//! `stationlock-storage`) implement.
//!
//! Lookups return `Ok(None)` for absence and `Err(_)` for failure. The
//! resolver decides whether absence is an error; implementations never do.

use crate::error::Result;
use crate::lock_record::LockRecord;
use crate::types::{DayStatus, ResourceKey, ResourceVersion, UnitCode, UserId, UserInfo};
use chrono::NaiveDate;

/// Effective-dated station configuration
pub trait VersionStore: Send + Sync {
    /// The single version of `resource` effective on `as_of`, if any
    fn find_effective(&self, resource: &str, as_of: NaiveDate) -> Result<Option<ResourceVersion>>;
}

/// Effective-dated user directory
pub trait UserDirectory: Send + Sync {
    /// The directory entry of `user` effective on `as_of`, if any
    fn find_user(&self, user: &UserId, as_of: NaiveDate) -> Result<Option<UserInfo>>;
}

/// Day-close state per unit per date
pub trait DayStatusProvider: Send + Sync {
    /// Day status of `unit` on `date`, if one was recorded
    fn status(&self, unit: &UnitCode, date: NaiveDate) -> Result<Option<DayStatus>>;
}

/// Backing storage of the lock registry
///
/// A lock store is only touched from inside the registry's critical section,
/// so implementations need no internal synchronization.
pub trait LockStore: Send {
    /// All records stored for any of `keys`
    ///
    /// This is a query, not a map lookup: a store without a unique constraint
    /// may return several records for one key. The registry rejects that.
    fn load(&self, keys: &[ResourceKey]) -> Result<Vec<LockRecord>>;

    /// Insert or replace the record for `record.key`
    fn upsert(&mut self, record: LockRecord) -> Result<()>;

    /// Remove the record for `key`, returning it if one existed
    fn remove(&mut self, key: &ResourceKey) -> Result<Option<LockRecord>>;
}
