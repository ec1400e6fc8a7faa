//! Core types for station lock resolution
//!
//! This crate defines the vocabulary shared by every layer:
//! - [`ResourceKey`]: one station on one operational day
//! - [`ResourceVersion`]: the effective-dated configuration of a station
//! - [`LockRecord`]: edit-lock and operation-lock state for a key
//! - [`UserInfo`] and [`DayStatus`]: read-only facts from external systems
//! - [`Error`]: the error taxonomy surfaced to callers
//! - Collaborator traits ([`VersionStore`], [`UserDirectory`],
//!   [`DayStatusProvider`], [`LockStore`]) implemented outside the resolver

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod lock_record;
pub mod traits;
pub mod types;

pub use error::{EntityKind, Error, Result};
pub use lock_record::LockRecord;
pub use traits::{DayStatusProvider, LockStore, UserDirectory, VersionStore};
pub use types::{DayStatus, OwnerRole, ResourceKey, ResourceVersion, UnitCode, UserId, UserInfo};
