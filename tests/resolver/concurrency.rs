//! Concurrent readers and writers over the lock registry

use crate::common::*;
use chrono::{TimeZone, Utc};
use stationlock::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

const READERS: usize = 4;
const WRITES: usize = 500;

fn state_a(key: &ResourceKey) -> LockRecord {
    LockRecord::new(key.clone())
        .with_edit_lock("alice", Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap())
        .with_operation_lock(Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap())
}

fn state_b(key: &ResourceKey) -> LockRecord {
    LockRecord::new(key.clone())
        .with_edit_lock("bob", Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap())
}

#[test]
fn readers_never_see_a_half_written_record() {
    let desk = TestDesk::new();
    let key = ResourceKey::new("ST-001", date());
    desk.put_record(state_a(&key));

    let locks = Arc::clone(&desk.locks);
    let done = Arc::new(AtomicBool::new(false));
    let start = Arc::new(Barrier::new(READERS + 1));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let locks = Arc::clone(&locks);
            let done = Arc::clone(&done);
            let start = Arc::clone(&start);
            let key = key.clone();
            thread::spawn(move || {
                let (a, b) = (state_a(&key), state_b(&key));
                start.wait();
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) {
                    let seen = locks.with_critical_section(|s| s.get_lock(&key)).unwrap();
                    // The writer removes then re-inserts inside one section
                    assert!(
                        seen.as_ref() == Some(&a) || seen.as_ref() == Some(&b),
                        "torn read: {:?}",
                        seen
                    );
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    start.wait();
    for i in 0..WRITES {
        let next = if i % 2 == 0 { state_b(&key) } else { state_a(&key) };
        locks
            .with_critical_section(|s| {
                s.remove(&key)?;
                s.put(next)
            })
            .unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn operation_lock_readers_see_before_or_after() {
    let desk = TestDesk::new();
    let key = ResourceKey::new("ST-001", date());
    let held_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let set_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 15, 0).unwrap();
    desk.locks.acquire_edit_lock(&key, &user("alice"), held_at).unwrap();

    let before = LockRecord::new(key.clone()).with_edit_lock("alice", held_at);
    let after = before.clone().with_operation_lock(set_at);
    let done = Arc::new(AtomicBool::new(false));
    let start = Arc::new(Barrier::new(READERS + 1));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let resolver = desk.resolver.clone();
            let locks = Arc::clone(&desk.locks);
            let done = Arc::clone(&done);
            let start = Arc::clone(&start);
            let (key, before, after) = (key.clone(), before.clone(), after.clone());
            thread::spawn(move || {
                start.wait();
                while !done.load(Ordering::Acquire) {
                    let seen = locks.with_critical_section(|s| s.get_lock(&key)).unwrap();
                    assert!(
                        seen.as_ref() == Some(&before) || seen.as_ref() == Some(&after),
                        "unexpected record: {:?}",
                        seen
                    );

                    // The flag flips but the edit lock underneath never does
                    resolver.is_operation_lock_set("ST-001", date()).unwrap();
                    assert!(resolver
                        .is_locked_by_another_user("ST-001", date(), &user("bob"))
                        .unwrap());
                }
            })
        })
        .collect();

    start.wait();
    for _ in 0..WRITES {
        desk.locks.set_operation_lock(&key, set_at).unwrap();
        desk.locks.clear_operation_lock(&key).unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
    assert!(!desk.resolver.is_operation_lock_set("ST-001", date()).unwrap());
    assert_eq!(desk.locks.with_critical_section(|s| s.get_lock(&key)).unwrap(), Some(before));
}

#[test]
fn exactly_one_racer_wins_the_edit_lock() {
    let desk = TestDesk::new();
    let key = ResourceKey::new("ST-001", date());
    let racers = 8;
    let start = Arc::new(Barrier::new(racers));
    let winners = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..racers)
        .map(|i| {
            let locks = Arc::clone(&desk.locks);
            let start = Arc::clone(&start);
            let winners = Arc::clone(&winners);
            let key = key.clone();
            thread::spawn(move || {
                start.wait();
                let me = user(&format!("operator-{}", i));
                if locks.acquire_edit_lock(&key, &me, Utc::now()).unwrap() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(winners.load(Ordering::SeqCst), 1);
}

#[test]
fn blocked_registry_fails_lock_queries_only() {
    let desk = TestDesk::with_lock_timeout(Duration::from_millis(30));
    desk.station("ST-001", "DC-7", "");
    desk.member("alice", "DC-7");

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let holder = {
        let locks = Arc::clone(&desk.locks);
        thread::spawn(move || {
            locks.with_critical_section(|_| {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                Ok(())
            })
        })
    };
    entered_rx.recv().unwrap();

    let r = &desk.resolver;
    let err = r.is_operation_lock_set("ST-001", date()).unwrap_err();
    assert!(matches!(err, Error::LockUnavailable { waited } if waited == Duration::from_millis(30)));
    assert!(r
        .is_locked_by_current_user("ST-001", date(), &user("alice"))
        .unwrap_err()
        .is_lock_unavailable());

    // Lookups that never touch lock records are not serialized behind the guard
    assert!(r.could_be_updated_by_current_user("ST-001", date(), &user("alice")).unwrap());
    assert_eq!(r.name("ST-001", date()).unwrap(), "Station ST-001");

    release_tx.send(()).unwrap();
    holder.join().unwrap().unwrap();
    assert!(!r.is_operation_lock_set("ST-001", date()).unwrap());
}
