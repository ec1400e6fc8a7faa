//! # Stationlock
//!
//! Lock and eligibility resolution for stations shared by several operator
//! roles.
//!
//! Given a station code and an operational day, Stationlock answers:
//! is the station edit-locked and by whom, is its operation lock set, may a
//! given user's unit update or conduct it, and has either owning unit closed
//! its day.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use stationlock::prelude::*;
//!
//! let versions = Arc::new(InMemoryVersionStore::new());
//! let users = Arc::new(InMemoryUserDirectory::new());
//! let days = Arc::new(InMemoryDayStatus::new());
//! let locks = Arc::new(LockRegistry::new(LockTable::new()));
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! versions.insert("ST-001", date, None, ResourceVersion::new("North Yard").with_actual_owner("DC-7"))?;
//! users.assign("alice", UnitCode::non_empty("DC-7").unwrap(), date, None)?;
//!
//! let resolver = Resolver::builder()
//!     .versions(versions)
//!     .users(users)
//!     .day_status(days)
//!     .lock_registry(locks)
//!     .build()?;
//!
//! let alice = UserId::new("alice");
//! assert!(resolver.could_be_updated_by_current_user("ST-001", date, &alice)?);
//! assert!(!resolver.is_locked_by_another_user("ST-001", date, &alice)?);
//! # Ok::<(), stationlock::Error>(())
//! ```
//!
//! ## Layers
//!
//! - `stationlock-core`: value types, errors, collaborator traits
//! - `stationlock-storage`: in-memory collaborators
//! - `stationlock-concurrency`: the lock registry and its critical section
//! - `stationlock-engine`: the resolver

#![warn(missing_docs)]

pub mod prelude;

pub use stationlock_concurrency::{LockRegistry, RegistryConfig};
pub use stationlock_core::{Error, Result};
pub use stationlock_engine::{Eligibility, Resolver, ResolverBuilder};
