//! Lock and eligibility resolution
//!
//! [`Resolver`] answers, for one station on one operational day:
//! - what the station is called as of that day
//! - whether it is edit-locked, and by whom
//! - whether its operation lock is set
//! - whether a user's unit owns (or conducts) it as of that day
//! - whether either owning unit has closed its day, directly or through an
//!   ancestor
//!
//! The resolver owns no data and never mutates anything. It is assembled
//! with [`ResolverBuilder`] from injected collaborators and a shared
//! [`LockRegistry`](stationlock_concurrency::LockRegistry).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod eligibility;
pub mod resolver;

pub use builder::ResolverBuilder;
pub use eligibility::{BlockingUnit, EditLockStatus, Eligibility};
pub use resolver::Resolver;
