//! Error types for lock and eligibility resolution
//!
//! Absence of a *required* entity (resource version, user info) is always an
//! error. Absence of an *optional* entity (lock record, owning unit, day
//! status) is a normal `false` branch and never reaches this type.

use crate::types::ResourceKey;
use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;

/// Kind of entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Effective-dated station configuration
    ResourceVersion,
    /// User directory entry
    User,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::ResourceVersion => write!(f, "resource version"),
            EntityKind::User => write!(f, "user"),
        }
    }
}

/// All resolution errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A required entity has no record effective at the requested date
    #[error("{entity} '{id}' not found as of {as_of}")]
    NotFound {
        /// What was looked up
        entity: EntityKind,
        /// Identifier used for the lookup
        id: String,
        /// As-of date of the lookup
        as_of: NaiveDate,
    },

    /// The lock registry critical section could not be entered in time
    #[error("lock registry unavailable after waiting {waited:?}")]
    LockUnavailable {
        /// How long the caller waited
        waited: Duration,
    },

    /// The operation has no defined behavior
    #[error("operation not implemented: {0}")]
    Unimplemented(&'static str),

    /// The lock store holds more than one record for a single key
    #[error("integrity violation: {records} lock records for {key}")]
    IntegrityViolation {
        /// The key with duplicate records
        key: ResourceKey,
        /// Number of records found
        records: usize,
    },

    /// Invalid input to a store (overlapping or empty effective intervals)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// An external collaborator failed
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Configuration could not be parsed or is incomplete
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a `NotFound` error.
    pub fn not_found(entity: EntityKind, id: impl Into<String>, as_of: NaiveDate) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
            as_of,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if the critical section timed out.
    pub fn is_lock_unavailable(&self) -> bool {
        matches!(self, Error::LockUnavailable { .. })
    }

    /// Check if the lock store returned duplicate records.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Error::IntegrityViolation { .. })
    }

    /// Check if this error is retryable.
    ///
    /// Only a timed-out critical section may succeed when called again; the
    /// resolver itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::LockUnavailable { .. })
    }
}
