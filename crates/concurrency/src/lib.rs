//! Concurrency layer for station lock resolution
//!
//! This crate implements the lock registry:
//! - [`LockRegistry`]: owns the lock store behind a mutual-exclusion guard
//! - [`CriticalSection`]: the only handle through which lock records are
//!   read or written
//! - [`RegistryConfig`]: bounded wait for entering the critical section
//!
//! Readers and writers share one guard, so a reader sees each record either
//! before or after a concurrent write, never in between.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod registry;

pub use config::RegistryConfig;
pub use registry::{CriticalSection, LockRegistry};
