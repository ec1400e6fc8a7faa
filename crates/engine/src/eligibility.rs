//! Composite answers built from several resolver lookups

use chrono::{DateTime, Utc};
use serde::Serialize;
use stationlock_core::{DayStatus, LockRecord, OwnerRole, UnitCode, UserId};

/// Edit-lock state of a station as seen by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EditLockStatus {
    /// Nobody holds the edit lock
    Unlocked,
    /// The asking user holds the edit lock
    HeldBySelf {
        /// When the lock was claimed
        since: DateTime<Utc>,
    },
    /// Someone else holds the edit lock
    HeldByOther {
        /// The holder, if the record names one
        holder: Option<UserId>,
        /// When the lock was claimed
        since: DateTime<Utc>,
    },
}

impl EditLockStatus {
    /// Classify a lock record from `user`'s point of view
    pub fn from_record(record: Option<&LockRecord>, user: &UserId) -> Self {
        let Some(record) = record else {
            return EditLockStatus::Unlocked;
        };
        let Some(since) = record.edit_locked_at else {
            return EditLockStatus::Unlocked;
        };

        if record.is_edit_locked_by(user) {
            EditLockStatus::HeldBySelf { since }
        } else {
            EditLockStatus::HeldByOther {
                holder: record.edit_holder.clone(),
                since,
            }
        }
    }

    /// True when the asking user holds the lock
    pub fn is_held_by_self(&self) -> bool {
        matches!(self, EditLockStatus::HeldBySelf { .. })
    }

    /// True when someone other than the asking user holds the lock
    pub fn is_held_by_other(&self) -> bool {
        matches!(self, EditLockStatus::HeldByOther { .. })
    }
}

/// An owning unit whose day status blocks edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingUnit {
    /// How the unit owns the station
    pub role: OwnerRole,
    /// The unit
    pub unit: UnitCode,
    /// Its day status on the queried date
    pub status: DayStatus,
}

/// Everything the resolver knows about one user and one station-day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    /// Station name as of the date
    pub name: String,
    /// Edit-lock state from the user's point of view
    pub edit_lock: EditLockStatus,
    /// Operation lock is set
    pub operation_locked: bool,
    /// User's unit is the actual owner
    pub could_update: bool,
    /// User's unit is the conduct owner
    pub could_conduct: bool,
    /// Owning units whose day is closed
    pub blocking_units: Vec<BlockingUnit>,
}

impl Eligibility {
    /// True when any owning unit's day is closed
    pub fn is_day_locked(&self) -> bool {
        !self.blocking_units.is_empty()
    }

    /// True when nothing stands between the user and an edit
    ///
    /// The user's unit must actually own the station, no other user may hold
    /// the edit lock, the operation lock must be clear and neither owning
    /// unit may have closed its day.
    pub fn can_edit(&self) -> bool {
        self.could_update
            && !self.edit_lock.is_held_by_other()
            && !self.operation_locked
            && !self.is_day_locked()
    }
}
