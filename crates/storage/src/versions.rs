//! In-memory effective-dated version store
//!
//! Each station code maps to a [`Timeline`] of [`ResourceVersion`]s. A
//! station can change owners over time, so the version effective on the
//! queried date is not necessarily the newest one.

use crate::timeline::Timeline;
use chrono::NaiveDate;
use dashmap::DashMap;
use stationlock_core::{ResourceVersion, Result, VersionStore};
use tracing::debug;

/// Station configuration history keyed by station code
#[derive(Debug, Default)]
pub struct InMemoryVersionStore {
    resources: DashMap<String, Timeline<ResourceVersion>>,
}

impl InMemoryVersionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a version of `resource` effective on `[from, to)`
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the interval overlaps an existing version of
    /// the same station.
    pub fn insert(
        &self,
        resource: impl Into<String>,
        from: NaiveDate,
        to: Option<NaiveDate>,
        version: ResourceVersion,
    ) -> Result<()> {
        let resource = resource.into();
        debug!("Recording version of {} effective from {}", resource, from);
        self.resources
            .entry(resource)
            .or_default()
            .insert(from, to, version)
    }

    /// Number of stations with at least one version
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

impl VersionStore for InMemoryVersionStore {
    fn find_effective(&self, resource: &str, as_of: NaiveDate) -> Result<Option<ResourceVersion>> {
        Ok(self
            .resources
            .get(resource)
            .and_then(|timeline| timeline.as_of(as_of).cloned()))
    }
}
