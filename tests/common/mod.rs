//! Shared fixtures for integration tests
//!
//! [`TestDesk`] wires a resolver to in-memory collaborators and keeps handles
//! to each so tests can seed versions, users, day statuses and locks.

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use stationlock::prelude::*;
use std::sync::{Arc, Once};
use std::time::Duration;

/// The operational day used by most scenarios
pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

/// A day relative to [`date`]
pub fn day(offset: i64) -> NaiveDate {
    date() + chrono::Duration::days(offset)
}

pub fn unit(code: &str) -> UnitCode {
    UnitCode::non_empty(code).unwrap()
}

pub fn user(id: &str) -> UserId {
    UserId::new(id)
}

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Resolver plus handles to every collaborator behind it
pub struct TestDesk {
    pub versions: Arc<InMemoryVersionStore>,
    pub users: Arc<InMemoryUserDirectory>,
    pub days: Arc<InMemoryDayStatus>,
    pub locks: Arc<LockRegistry>,
    pub resolver: Resolver,
}

impl TestDesk {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_lock_timeout(timeout: Duration) -> Self {
        Self::with_config(RegistryConfig::default().with_acquire_timeout(timeout))
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        init_tracing();
        let versions = Arc::new(InMemoryVersionStore::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let days = Arc::new(InMemoryDayStatus::new());
        let locks = Arc::new(LockRegistry::with_config(LockTable::new(), config));
        let resolver = Resolver::builder()
            .versions(versions.clone())
            .users(users.clone())
            .day_status(days.clone())
            .lock_registry(locks.clone())
            .build()
            .unwrap();
        TestDesk {
            versions,
            users,
            days,
            locks,
            resolver,
        }
    }

    /// Station effective from [`date`] onwards
    pub fn station(&self, code: &str, actual: &str, conduct: &str) {
        self.versions
            .insert(
                code,
                date(),
                None,
                ResourceVersion::new(format!("Station {}", code))
                    .with_actual_owner(actual)
                    .with_conduct_owner(conduct),
            )
            .unwrap();
    }

    /// User assigned to `home` from [`date`] onwards
    pub fn member(&self, id: &str, home: &str) {
        self.users.assign(id, unit(home), date(), None).unwrap();
    }

    /// User present from [`date`] onwards with no unit assignment
    pub fn member_without_unit(&self, id: &str) {
        self.users.assign_without_unit(id, date(), None).unwrap();
    }

    pub fn close_day(&self, code: &str, status: DayStatus) {
        self.days.set(unit(code), date(), status);
    }

    pub fn edit_lock(&self, code: &str, holder: &str) {
        let key = ResourceKey::new(code, date());
        assert!(self
            .locks
            .acquire_edit_lock(&key, &user(holder), Utc::now())
            .unwrap());
    }

    pub fn put_record(&self, record: LockRecord) {
        self.locks
            .with_critical_section(|s| s.put(record))
            .unwrap();
    }
}

impl Default for TestDesk {
    fn default() -> Self {
        Self::new()
    }
}
