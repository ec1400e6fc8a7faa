//! Value types for station lock resolution
//!
//! - [`ResourceKey`]: station code plus operational date
//! - [`UserId`] / [`UnitCode`]: identifiers for users and organizational units
//! - [`ResourceVersion`]: station configuration effective at a date
//! - [`UserInfo`]: a user's unit assignment effective at a date
//! - [`DayStatus`]: day-close state of a unit on a date

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One station on one operational day
///
/// The date carries no time-of-day. Equality and hashing are by value, so a
/// key can be rebuilt from primitive identifiers at every call.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use stationlock_core::ResourceKey;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let a = ResourceKey::new("ST-001", date);
/// let b = ResourceKey::at("ST-001", date.and_hms_opt(17, 45, 0).unwrap());
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    /// Unique code of the station
    pub resource: String,
    /// Operational day
    pub date: NaiveDate,
}

impl ResourceKey {
    /// Create a key for a station on a day
    pub fn new(resource: impl Into<String>, date: NaiveDate) -> Self {
        ResourceKey {
            resource: resource.into(),
            date,
        }
    }

    /// Create a key from a timestamp, dropping the time-of-day
    pub fn at(resource: impl Into<String>, at: NaiveDateTime) -> Self {
        Self::new(resource, at.date())
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.resource, self.date)
    }
}

/// Identifier of an operator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a user identifier
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::new(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Code of an organizational unit
///
/// A unit code is never blank. Blank codes coming from external records are
/// mapped to "no unit" by [`UnitCode::non_empty`]. Any other code is kept
/// verbatim, so `" DC-7"` and `"DC-7"` are different units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitCode(String);

impl UnitCode {
    /// Create a unit code, or `None` if the code is empty or whitespace
    ///
    /// The code is not trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stationlock_core::UnitCode;
    ///
    /// assert!(UnitCode::non_empty("DC-7").is_some());
    /// assert!(UnitCode::non_empty("").is_none());
    /// assert!(UnitCode::non_empty("  ").is_none());
    /// assert_eq!(UnitCode::non_empty(" DC-7").unwrap().as_str(), " DC-7");
    /// ```
    pub fn non_empty(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            None
        } else {
            Some(UnitCode(code))
        }
    }

    /// Borrow the code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which ownership relation a unit has to a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerRole {
    /// The unit that actually operates the station
    Actual,
    /// The unit that conducts (coordinates) the station
    Conduct,
}

/// Station configuration effective at some date
///
/// Produced by the external version store; the resolver only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceVersion {
    /// Display name of the station
    pub name: String,
    /// Unit that actually operates the station
    pub actual_owner: Option<UnitCode>,
    /// Unit that conducts the station
    pub conduct_owner: Option<UnitCode>,
}

impl ResourceVersion {
    /// Create a version with no owning units
    pub fn new(name: impl Into<String>) -> Self {
        ResourceVersion {
            name: name.into(),
            actual_owner: None,
            conduct_owner: None,
        }
    }

    /// Set the actual owner; an empty code clears it
    pub fn with_actual_owner(mut self, code: impl Into<String>) -> Self {
        self.actual_owner = UnitCode::non_empty(code);
        self
    }

    /// Set the conduct owner; an empty code clears it
    pub fn with_conduct_owner(mut self, code: impl Into<String>) -> Self {
        self.conduct_owner = UnitCode::non_empty(code);
        self
    }

    /// Owning unit for a role
    pub fn owner(&self, role: OwnerRole) -> Option<&UnitCode> {
        match role {
            OwnerRole::Actual => self.actual_owner.as_ref(),
            OwnerRole::Conduct => self.conduct_owner.as_ref(),
        }
    }

    /// Present owning units, actual owner first
    pub fn owners(&self) -> impl Iterator<Item = (OwnerRole, &UnitCode)> {
        [OwnerRole::Actual, OwnerRole::Conduct]
            .into_iter()
            .filter_map(move |role| self.owner(role).map(|code| (role, code)))
    }
}

/// A user's directory entry effective at some date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user
    pub user: UserId,
    /// Unit the user belongs to; `None` for a user with no unit assignment
    pub home_unit: Option<UnitCode>,
}

impl UserInfo {
    /// Create a directory entry for a user assigned to `home_unit`
    pub fn new(user: impl Into<UserId>, home_unit: UnitCode) -> Self {
        UserInfo {
            user: user.into(),
            home_unit: Some(home_unit),
        }
    }

    /// Create a directory entry for a user who belongs to no unit
    pub fn without_unit(user: impl Into<UserId>) -> Self {
        UserInfo {
            user: user.into(),
            home_unit: None,
        }
    }
}

/// Day-close state of a unit on a date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatus {
    /// The unit closed its own day
    pub is_locked: bool,
    /// An ancestor unit closed its day, cascading to this unit
    pub is_parent_locked: bool,
}

impl DayStatus {
    /// Day closed by the unit itself
    pub fn locked() -> Self {
        DayStatus {
            is_locked: true,
            is_parent_locked: false,
        }
    }

    /// Day closed by an ancestor unit
    pub fn parent_locked() -> Self {
        DayStatus {
            is_locked: false,
            is_parent_locked: true,
        }
    }

    /// True when the status blocks edits on owned stations
    pub fn blocks_edits(&self) -> bool {
        self.is_locked || self.is_parent_locked
    }
}
