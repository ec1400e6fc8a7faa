//! In-memory effective-dated user directory

use crate::timeline::Timeline;
use chrono::NaiveDate;
use dashmap::DashMap;
use stationlock_core::{Result, UnitCode, UserDirectory, UserId, UserInfo};

/// User unit assignments keyed by user
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<UserId, Timeline<UserInfo>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `user` to `home_unit` on `[from, to)`
    pub fn assign(
        &self,
        user: impl Into<UserId>,
        home_unit: UnitCode,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<()> {
        let user = user.into();
        let info = UserInfo::new(user.clone(), home_unit);
        self.record(user, info, from, to)
    }

    /// Record `user` on `[from, to)` with no home unit
    pub fn assign_without_unit(
        &self,
        user: impl Into<UserId>,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<()> {
        let user = user.into();
        let info = UserInfo::without_unit(user.clone());
        self.record(user, info, from, to)
    }

    fn record(
        &self,
        user: UserId,
        info: UserInfo,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<()> {
        self.users.entry(user).or_default().insert(from, to, info)
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_user(&self, user: &UserId, as_of: NaiveDate) -> Result<Option<UserInfo>> {
        Ok(self
            .users
            .get(user)
            .and_then(|timeline| timeline.as_of(as_of).cloned()))
    }
}
