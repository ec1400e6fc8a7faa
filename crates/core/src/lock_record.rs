//! Lock state for one station on one day
//!
//! A record carries two independent locks:
//! - an edit lock, claimed by a single user
//! - an operation lock, set administratively when the day's data is frozen
//!
//! The edit lock is held iff `edit_locked_at` is present. A holder without a
//! timestamp is a released lock whose holder field was never cleared.

use crate::types::{ResourceKey, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lock record for a [`ResourceKey`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Station and day this record belongs to
    pub key: ResourceKey,
    /// Last user to claim the edit lock
    pub edit_holder: Option<UserId>,
    /// When the edit lock was claimed; `None` means not edit-locked
    pub edit_locked_at: Option<DateTime<Utc>>,
    /// When the operation lock was set; `None` means not operation-locked
    pub operation_locked_at: Option<DateTime<Utc>>,
}

impl LockRecord {
    /// Create an empty record for a key
    pub fn new(key: ResourceKey) -> Self {
        LockRecord {
            key,
            edit_holder: None,
            edit_locked_at: None,
            operation_locked_at: None,
        }
    }

    /// Record an edit lock held by `holder` since `at`
    pub fn with_edit_lock(mut self, holder: impl Into<UserId>, at: DateTime<Utc>) -> Self {
        self.edit_holder = Some(holder.into());
        self.edit_locked_at = Some(at);
        self
    }

    /// Record an operation lock set at `at`
    pub fn with_operation_lock(mut self, at: DateTime<Utc>) -> Self {
        self.operation_locked_at = Some(at);
        self
    }

    /// True when the edit lock is held by anyone
    pub fn is_edit_locked(&self) -> bool {
        self.edit_locked_at.is_some()
    }

    /// True when the edit lock is held by `user`
    pub fn is_edit_locked_by(&self, user: &UserId) -> bool {
        self.is_edit_locked() && self.edit_holder.as_ref() == Some(user)
    }

    /// True when the edit lock is held by anyone other than `user`
    ///
    /// A held lock with no recorded holder counts as held by another user.
    pub fn is_edit_locked_by_other(&self, user: &UserId) -> bool {
        self.is_edit_locked() && self.edit_holder.as_ref() != Some(user)
    }

    /// True when the operation lock is set
    pub fn is_operation_locked(&self) -> bool {
        self.operation_locked_at.is_some()
    }
}
