//! Answers follow the configuration effective on the queried day, not the
//! newest one

use crate::common::*;
use stationlock::prelude::*;

fn transferred_station(desk: &TestDesk) {
    desk.versions
        .insert(
            "ST-001",
            day(-30),
            Some(date()),
            ResourceVersion::new("North Yard").with_actual_owner("DC-7"),
        )
        .unwrap();
    desk.versions
        .insert(
            "ST-001",
            date(),
            None,
            ResourceVersion::new("North Yard (East)").with_actual_owner("DC-9"),
        )
        .unwrap();
}

#[test]
fn name_follows_effective_version() {
    let desk = TestDesk::new();
    transferred_station(&desk);

    assert_eq!(desk.resolver.name("ST-001", day(-1)).unwrap(), "North Yard");
    assert_eq!(desk.resolver.name("ST-001", date()).unwrap(), "North Yard (East)");
}

#[test]
fn ownership_follows_effective_version() {
    let desk = TestDesk::new();
    transferred_station(&desk);
    desk.users.assign("alice", unit("DC-7"), day(-60), None).unwrap();

    let r = &desk.resolver;
    assert!(r.could_be_updated_by_current_user("ST-001", day(-1), &user("alice")).unwrap());
    assert!(!r.could_be_updated_by_current_user("ST-001", date(), &user("alice")).unwrap());
}

#[test]
fn user_transfer_follows_effective_entry() {
    let desk = TestDesk::new();
    desk.versions
        .insert(
            "ST-001",
            day(-60),
            None,
            ResourceVersion::new("North Yard").with_actual_owner("DC-9"),
        )
        .unwrap();
    desk.users.assign("alice", unit("DC-7"), day(-60), Some(date())).unwrap();
    desk.users.assign("alice", unit("DC-9"), date(), None).unwrap();

    let r = &desk.resolver;
    assert!(!r.could_be_updated_by_current_user("ST-001", day(-1), &user("alice")).unwrap());
    assert!(r.could_be_updated_by_current_user("ST-001", date(), &user("alice")).unwrap());
}

#[test]
fn day_close_checks_owner_effective_that_day() {
    let desk = TestDesk::new();
    transferred_station(&desk);
    // The former owner closing today must not block; the current one must
    desk.close_day("DC-7", DayStatus::locked());
    assert!(!desk.resolver.is_day_locked_for_owning_units("ST-001", date()).unwrap());

    desk.close_day("DC-9", DayStatus::parent_locked());
    assert!(desk.resolver.is_day_locked_for_owning_units("ST-001", date()).unwrap());
}

#[test]
fn day_before_first_version_is_not_found() {
    let desk = TestDesk::new();
    transferred_station(&desk);

    let err = desk.resolver.name("ST-001", day(-31)).unwrap_err();
    assert!(err.is_not_found());
}
