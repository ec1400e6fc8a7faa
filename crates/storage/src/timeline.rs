//! Effective-dated history of a single entity
//!
//! Each entry is effective from `from` (inclusive) until `to` (exclusive), or
//! indefinitely when `to` is `None`. Intervals never overlap, so at most one
//! entry is effective on any date.

use chrono::NaiveDate;
use stationlock_core::{Error, Result};

/// One effective-dated entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effective<T> {
    /// First day the entry applies
    pub from: NaiveDate,
    /// First day the entry no longer applies
    pub to: Option<NaiveDate>,
    /// The entry
    pub value: T,
}

impl<T> Effective<T> {
    fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && self.to.map_or(true, |to| date < to)
    }

    fn overlaps(&self, from: NaiveDate, to: Option<NaiveDate>) -> bool {
        let starts_before_other_ends = to.map_or(true, |to| self.from < to);
        let other_starts_before_self_ends = self.to.map_or(true, |self_to| from < self_to);
        starts_before_other_ends && other_starts_before_self_ends
    }
}

/// Non-overlapping effective-dated entries, ordered by start date
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    entries: Vec<Effective<T>>,
}

impl<T> Timeline<T> {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry effective on `[from, to)`
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the interval is empty or overlaps an
    /// existing entry.
    pub fn insert(&mut self, from: NaiveDate, to: Option<NaiveDate>, value: T) -> Result<()> {
        if let Some(to) = to {
            if to <= from {
                return Err(Error::ConstraintViolation(format!(
                    "empty effective interval [{}, {})",
                    from, to
                )));
            }
        }
        if let Some(existing) = self.entries.iter().find(|e| e.overlaps(from, to)) {
            return Err(Error::ConstraintViolation(format!(
                "effective interval starting {} overlaps entry starting {}",
                from, existing.from
            )));
        }

        let at = self.entries.partition_point(|e| e.from < from);
        self.entries.insert(at, Effective { from, to, value });
        Ok(())
    }

    /// The entry effective on `date`
    pub fn as_of(&self, date: NaiveDate) -> Option<&T> {
        let candidates = self.entries.partition_point(|e| e.from <= date);
        // Entries are disjoint and sorted, so only the latest start can match
        candidates
            .checked_sub(1)
            .map(|i| &self.entries[i])
            .filter(|e| e.contains(date))
            .map(|e| &e.value)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the timeline has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
