//! In-memory day-close status table

use chrono::NaiveDate;
use dashmap::DashMap;
use stationlock_core::{DayStatus, DayStatusProvider, Result, UnitCode};

/// Day status per (unit, date)
///
/// Units with no recorded status for a date are reported as absent, which
/// the resolver treats as "not closed".
#[derive(Debug, Default)]
pub struct InMemoryDayStatus {
    statuses: DashMap<(UnitCode, NaiveDate), DayStatus>,
}

impl InMemoryDayStatus {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status of `unit` on `date`, replacing any previous one
    pub fn set(&self, unit: UnitCode, date: NaiveDate, status: DayStatus) {
        self.statuses.insert((unit, date), status);
    }

    /// Forget the status of `unit` on `date`
    pub fn clear(&self, unit: &UnitCode, date: NaiveDate) -> Option<DayStatus> {
        self.statuses
            .remove(&(unit.clone(), date))
            .map(|(_, status)| status)
    }
}

impl DayStatusProvider for InMemoryDayStatus {
    fn status(&self, unit: &UnitCode, date: NaiveDate) -> Result<Option<DayStatus>> {
        Ok(self.statuses.get(&(unit.clone(), date)).map(|s| *s))
    }
}
