//! The lock and eligibility resolver
//!
//! Every query takes a station code and an operational date. Lookups split
//! into two classes:
//!
//! | Entity | Absent means |
//! |--------|--------------|
//! | resource version | `NotFound` |
//! | user info | `NotFound` |
//! | lock record | not locked |
//! | owning unit code | unit skipped |
//! | day status | unit not closed |
//!
//! Collaborator failures propagate unchanged. Nothing is retried.

use crate::builder::ResolverBuilder;
use crate::eligibility::{BlockingUnit, EditLockStatus, Eligibility};
use chrono::NaiveDate;
use stationlock_concurrency::LockRegistry;
use stationlock_core::{
    DayStatusProvider, EntityKind, Error, LockRecord, OwnerRole, ResourceKey, ResourceVersion,
    Result, UnitCode, UserDirectory, UserId, UserInfo, VersionStore,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Read-only facade over the version store, user directory, day-status
/// provider and lock registry
///
/// Cheap to share: all collaborators sit behind `Arc`.
#[derive(Clone)]
pub struct Resolver {
    versions: Arc<dyn VersionStore>,
    users: Arc<dyn UserDirectory>,
    day_status: Arc<dyn DayStatusProvider>,
    locks: Arc<LockRegistry>,
}

impl Resolver {
    /// Create a builder
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub(crate) fn from_parts(
        versions: Arc<dyn VersionStore>,
        users: Arc<dyn UserDirectory>,
        day_status: Arc<dyn DayStatusProvider>,
        locks: Arc<LockRegistry>,
    ) -> Self {
        Resolver {
            versions,
            users,
            day_status,
            locks,
        }
    }

    /// The lock registry this resolver reads
    pub fn lock_registry(&self) -> &Arc<LockRegistry> {
        &self.locks
    }

    // =========================================================================
    // Name
    // =========================================================================

    /// Name of the station as of `date`
    ///
    /// # Errors
    ///
    /// `NotFound` if no version is effective on `date`.
    pub fn name(&self, resource: &str, date: NaiveDate) -> Result<String> {
        Ok(self.version(resource, date)?.name)
    }

    // =========================================================================
    // Edit and operation locks
    // =========================================================================

    /// True when `user` holds the edit lock on the station-day
    pub fn is_locked_by_current_user(
        &self,
        resource: &str,
        date: NaiveDate,
        user: &UserId,
    ) -> Result<bool> {
        let locked = self
            .lock_record(resource, date)?
            .map_or(false, |record| record.is_edit_locked_by(user));
        debug!("{}@{} edit-locked by {}: {}", resource, date, user, locked);
        Ok(locked)
    }

    /// True when a user other than `user` holds the edit lock
    pub fn is_locked_by_another_user(
        &self,
        resource: &str,
        date: NaiveDate,
        user: &UserId,
    ) -> Result<bool> {
        let locked = self
            .lock_record(resource, date)?
            .map_or(false, |record| record.is_edit_locked_by_other(user));
        debug!("{}@{} edit-locked by other than {}: {}", resource, date, user, locked);
        Ok(locked)
    }

    /// True when the operation lock is set on the station-day
    pub fn is_operation_lock_set(&self, resource: &str, date: NaiveDate) -> Result<bool> {
        let locked = self
            .lock_record(resource, date)?
            .map_or(false, |record| record.is_operation_locked());
        debug!("{}@{} operation-locked: {}", resource, date, locked);
        Ok(locked)
    }

    /// Who holds the edit lock, from `user`'s point of view
    pub fn edit_lock_status(
        &self,
        resource: &str,
        date: NaiveDate,
        user: &UserId,
    ) -> Result<EditLockStatus> {
        let record = self.lock_record(resource, date)?;
        Ok(EditLockStatus::from_record(record.as_ref(), user))
    }

    /// Operation-lock flag for several stations on one day
    ///
    /// All records are read in one critical section, so the result is a
    /// single consistent snapshot. Every requested station appears in the
    /// result.
    pub fn operation_locks(
        &self,
        resources: &[&str],
        date: NaiveDate,
    ) -> Result<BTreeMap<String, bool>> {
        let keys: Vec<ResourceKey> = resources
            .iter()
            .map(|resource| ResourceKey::new(*resource, date))
            .collect();
        let locks = self.locks.with_critical_section(|s| s.get_locks(&keys))?;

        Ok(keys
            .into_iter()
            .map(|key| {
                let locked = locks.get(&key).map_or(false, LockRecord::is_operation_locked);
                (key.resource, locked)
            })
            .collect())
    }

    // =========================================================================
    // Organizational eligibility
    // =========================================================================

    /// True when `user`'s unit is the station's actual owner as of `date`
    ///
    /// # Errors
    ///
    /// `NotFound` if no version or no user entry is effective on `date`.
    pub fn could_be_updated_by_current_user(
        &self,
        resource: &str,
        date: NaiveDate,
        user: &UserId,
    ) -> Result<bool> {
        self.is_owned_by_users_unit(OwnerRole::Actual, resource, date, user)
    }

    /// True when `user`'s unit is the station's conduct owner as of `date`
    ///
    /// # Errors
    ///
    /// `NotFound` if no version or no user entry is effective on `date`.
    pub fn could_be_conducted_by_user(
        &self,
        resource: &str,
        date: NaiveDate,
        user: &UserId,
    ) -> Result<bool> {
        self.is_owned_by_users_unit(OwnerRole::Conduct, resource, date, user)
    }

    fn is_owned_by_users_unit(
        &self,
        role: OwnerRole,
        resource: &str,
        date: NaiveDate,
        user: &UserId,
    ) -> Result<bool> {
        let version = self.version(resource, date)?;
        let info = self.user(user, date)?;
        let owns = same_unit(version.owner(role), info.home_unit.as_ref());
        debug!(
            "{}@{} {:?} owner {:?} vs {} home unit {:?}: {}",
            resource,
            date,
            role,
            version.owner(role),
            user,
            info.home_unit,
            owns
        );
        Ok(owns)
    }

    // =========================================================================
    // Day close
    // =========================================================================

    /// True when either owning unit's day is closed, directly or by an
    /// ancestor
    ///
    /// # Errors
    ///
    /// `NotFound` if no version is effective on `date`.
    pub fn is_day_locked_for_owning_units(&self, resource: &str, date: NaiveDate) -> Result<bool> {
        Ok(!self.day_lock_sources(resource, date)?.is_empty())
    }

    /// Owning units whose day status blocks edits on `date`
    ///
    /// Units without a code or without a recorded status are skipped.
    pub fn day_lock_sources(&self, resource: &str, date: NaiveDate) -> Result<Vec<BlockingUnit>> {
        let version = self.version(resource, date)?;
        self.blocking_units(&version, date)
    }

    fn blocking_units(&self, version: &ResourceVersion, date: NaiveDate) -> Result<Vec<BlockingUnit>> {
        let mut blocking = Vec::new();
        for (role, unit) in version.owners() {
            if let Some(status) = self.day_status.status(unit, date)? {
                if status.blocks_edits() {
                    debug!("Day of {:?} owner {} closed on {}: {:?}", role, unit, date, status);
                    blocking.push(BlockingUnit {
                        role,
                        unit: unit.clone(),
                        status,
                    });
                }
            }
        }
        Ok(blocking)
    }

    // =========================================================================
    // Composite
    // =========================================================================

    /// Full eligibility picture for `user` on the station-day
    ///
    /// Reads the version, the user entry and the lock record once each.
    ///
    /// # Errors
    ///
    /// `NotFound` if no version or no user entry is effective on `date`.
    pub fn eligibility(&self, resource: &str, date: NaiveDate, user: &UserId) -> Result<Eligibility> {
        let version = self.version(resource, date)?;
        let info = self.user(user, date)?;
        let record = self.lock_record(resource, date)?;
        let blocking_units = self.blocking_units(&version, date)?;

        Ok(Eligibility {
            edit_lock: EditLockStatus::from_record(record.as_ref(), user),
            operation_locked: record.as_ref().map_or(false, LockRecord::is_operation_locked),
            could_update: same_unit(version.actual_owner.as_ref(), info.home_unit.as_ref()),
            could_conduct: same_unit(version.conduct_owner.as_ref(), info.home_unit.as_ref()),
            blocking_units,
            name: version.name,
        })
    }

    // =========================================================================
    // Pending definition
    // =========================================================================

    /// Whether the initial data load has completed
    ///
    /// No behavior is defined for this query yet.
    ///
    /// # Errors
    ///
    /// Always `Unimplemented`.
    pub fn is_initial_data_loaded(&self) -> Result<bool> {
        Err(Error::Unimplemented("is_initial_data_loaded"))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    fn version(&self, resource: &str, date: NaiveDate) -> Result<ResourceVersion> {
        self.versions.find_effective(resource, date)?.ok_or_else(|| {
            debug!("No version of {} effective on {}", resource, date);
            Error::not_found(EntityKind::ResourceVersion, resource, date)
        })
    }

    fn user(&self, user: &UserId, date: NaiveDate) -> Result<UserInfo> {
        self.users.find_user(user, date)?.ok_or_else(|| {
            debug!("No directory entry for {} effective on {}", user, date);
            Error::not_found(EntityKind::User, user.as_str(), date)
        })
    }

    /// The lock record for the station-day, read inside the critical section
    fn lock_record(&self, resource: &str, date: NaiveDate) -> Result<Option<LockRecord>> {
        let key = ResourceKey::new(resource, date);
        self.locks.with_critical_section(|s| s.get_lock(&key))
    }
}

/// Ownership match: an absent unit on either side matches nothing
fn same_unit(owner: Option<&UnitCode>, home: Option<&UnitCode>) -> bool {
    matches!((owner, home), (Some(owner), Some(home)) if owner == home)
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}
