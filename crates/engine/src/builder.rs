//! Resolver assembly

use crate::resolver::Resolver;
use stationlock_concurrency::LockRegistry;
use stationlock_core::{DayStatusProvider, Error, Result, UserDirectory, VersionStore};
use std::sync::Arc;

/// Builder for [`Resolver`]
///
/// Every collaborator is required; the lock registry is shared with the
/// process that acquires and releases locks.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use stationlock_concurrency::LockRegistry;
/// use stationlock_engine::Resolver;
/// use stationlock_storage::{InMemoryDayStatus, InMemoryUserDirectory, InMemoryVersionStore, LockTable};
///
/// let resolver = Resolver::builder()
///     .versions(Arc::new(InMemoryVersionStore::new()))
///     .users(Arc::new(InMemoryUserDirectory::new()))
///     .day_status(Arc::new(InMemoryDayStatus::new()))
///     .lock_registry(Arc::new(LockRegistry::new(LockTable::new())))
///     .build()
///     .unwrap();
/// # let _ = resolver;
/// ```
#[derive(Default)]
pub struct ResolverBuilder {
    versions: Option<Arc<dyn VersionStore>>,
    users: Option<Arc<dyn UserDirectory>>,
    day_status: Option<Arc<dyn DayStatusProvider>>,
    locks: Option<Arc<LockRegistry>>,
}

impl ResolverBuilder {
    /// Create a builder with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version store
    pub fn versions(mut self, versions: Arc<dyn VersionStore>) -> Self {
        self.versions = Some(versions);
        self
    }

    /// Set the user directory
    pub fn users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = Some(users);
        self
    }

    /// Set the day-status provider
    pub fn day_status(mut self, day_status: Arc<dyn DayStatusProvider>) -> Self {
        self.day_status = Some(day_status);
        self
    }

    /// Set the lock registry
    pub fn lock_registry(mut self, locks: Arc<LockRegistry>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Build the resolver
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first missing collaborator.
    pub fn build(self) -> Result<Resolver> {
        let versions = self.versions.ok_or_else(|| missing("version store"))?;
        let users = self.users.ok_or_else(|| missing("user directory"))?;
        let day_status = self.day_status.ok_or_else(|| missing("day status provider"))?;
        let locks = self.locks.ok_or_else(|| missing("lock registry"))?;
        Ok(Resolver::from_parts(versions, users, day_status, locks))
    }
}

fn missing(what: &str) -> Error {
    Error::InvalidConfig(format!("{} not set", what))
}
