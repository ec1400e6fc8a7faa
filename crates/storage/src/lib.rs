//! In-memory collaborators for station lock resolution
//!
//! This crate implements the collaborator traits from `stationlock-core`:
//! - [`InMemoryVersionStore`]: effective-dated station configuration
//! - [`InMemoryUserDirectory`]: effective-dated user unit assignments
//! - [`InMemoryDayStatus`]: day-close state per unit per date
//! - [`LockTable`]: backing rows for the lock registry
//!
//! Production deployments plug their own stores in behind the same traits.
//! These implementations back embedded use and tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod day_status;
pub mod directory;
pub mod lock_table;
pub mod timeline;
pub mod versions;

pub use day_status::InMemoryDayStatus;
pub use directory::InMemoryUserDirectory;
pub use lock_table::LockTable;
pub use timeline::Timeline;
pub use versions::InMemoryVersionStore;
