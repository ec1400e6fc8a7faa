//! Convenient imports for Stationlock.
//!
//! ```
//! use stationlock::prelude::*;
//! ```

// Resolver
pub use stationlock_engine::{
    BlockingUnit, EditLockStatus, Eligibility, Resolver, ResolverBuilder,
};

// Lock registry
pub use stationlock_concurrency::{CriticalSection, LockRegistry, RegistryConfig};

// Error handling
pub use stationlock_core::{EntityKind, Error, Result};

// Core types
pub use stationlock_core::{
    DayStatus, LockRecord, OwnerRole, ResourceKey, ResourceVersion, UnitCode, UserId, UserInfo,
};

// Collaborator traits
pub use stationlock_core::{DayStatusProvider, LockStore, UserDirectory, VersionStore};

// In-memory collaborators
pub use stationlock_storage::{
    InMemoryDayStatus, InMemoryUserDirectory, InMemoryVersionStore, LockTable,
};

// Dates
pub use chrono::NaiveDate;
