// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_customer, create_test_persistence, create_test_staff};
use crate::{EventData, Persistence, PersistenceError};
use caterbook_domain::Slot;

#[test]
fn test_create_event_and_fetch_by_date() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");

    let event_id: i64 = persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();

    let event: EventData = persistence
        .get_event_by_date("2025-06-01")
        .unwrap()
        .expect("Event should exist");

    assert_eq!(event.event_id, event_id);
    assert_eq!(event.name, "Wedding");
    assert_eq!(event.requestor_id, customer_id);
    assert_eq!(event.staff1_id, None);
    assert_eq!(event.staff2_id, None);
    assert_eq!(event.staff3_id, None);
}

#[test]
fn test_second_event_on_same_date_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");
    let other_id: i64 = create_test_customer(&mut persistence, "c2");

    persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();

    let result: Result<i64, PersistenceError> =
        persistence.create_event("2025-06-01", "Graduation", other_id);

    assert_eq!(
        result,
        Err(PersistenceError::DateUnavailable {
            date: String::from("2025-06-01")
        })
    );
}

#[test]
fn test_list_upcoming_applies_inclusive_boundary_and_date_order() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");

    persistence
        .create_event("2025-06-02", "Graduation", customer_id)
        .unwrap();
    persistence
        .create_event("2025-05-31", "Birthday", customer_id)
        .unwrap();
    persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();

    let upcoming: Vec<EventData> = persistence.list_upcoming("2025-06-01").unwrap();

    // The as-of day is included, the day before is excluded, and the
    // result is ascending by date.
    let dates: Vec<&str> = upcoming.iter().map(|e| e.event_date.as_str()).collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-02"]);
}

#[test]
fn test_list_understaffed_requires_all_slots_empty() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");
    let staff_id: i64 = create_test_staff(&mut persistence, "s1");

    let staffed: i64 = persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();
    persistence
        .create_event("2025-06-02", "Graduation", customer_id)
        .unwrap();

    persistence
        .set_event_staff(staffed, Slot::First, staff_id)
        .unwrap();

    let understaffed: Vec<EventData> = persistence.list_understaffed("2025-06-01").unwrap();

    assert_eq!(understaffed.len(), 1);
    assert_eq!(understaffed[0].event_date, "2025-06-02");
}

#[test]
fn test_staff_listings_are_disjoint() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");
    let staff_id: i64 = create_test_staff(&mut persistence, "s1");

    let mine: i64 = persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();
    let open: i64 = persistence
        .create_event("2025-06-02", "Graduation", customer_id)
        .unwrap();

    persistence
        .set_event_staff(mine, Slot::First, staff_id)
        .unwrap();

    let my_events: Vec<EventData> = persistence.list_events_for_staff("2025-06-01", staff_id).unwrap();
    let available: Vec<EventData> = persistence
        .list_available_events_for_staff("2025-06-01", staff_id)
        .unwrap();

    assert_eq!(my_events.len(), 1);
    assert_eq!(my_events[0].event_id, mine);

    // An event the staff member already works on is excluded from
    // "available" even though it still has open slots.
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].event_id, open);
}

#[test]
fn test_available_listing_excludes_full_events() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");
    let s1: i64 = create_test_staff(&mut persistence, "s1");
    let s2: i64 = create_test_staff(&mut persistence, "s2");
    let s3: i64 = create_test_staff(&mut persistence, "s3");
    let s4: i64 = create_test_staff(&mut persistence, "s4");

    let full: i64 = persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();
    persistence.set_event_staff(full, Slot::First, s1).unwrap();
    persistence.set_event_staff(full, Slot::Second, s2).unwrap();
    persistence.set_event_staff(full, Slot::Third, s3).unwrap();

    let available: Vec<EventData> = persistence
        .list_available_events_for_staff("2025-06-01", s4)
        .unwrap();

    assert!(available.is_empty());
}

#[test]
fn test_set_event_staff_writes_the_requested_slot() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");
    let staff_id: i64 = create_test_staff(&mut persistence, "s1");

    let event_id: i64 = persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();

    persistence
        .set_event_staff(event_id, Slot::Second, staff_id)
        .unwrap();

    let event: EventData = persistence.get_event_by_id(event_id).unwrap().unwrap();
    assert_eq!(event.staff1_id, None);
    assert_eq!(event.staff2_id, Some(staff_id));
    assert_eq!(event.staff3_id, None);
}

#[test]
fn test_set_event_staff_on_missing_event_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let staff_id: i64 = create_test_staff(&mut persistence, "s1");

    let result: Result<(), PersistenceError> =
        persistence.set_event_staff(999, Slot::First, staff_id);

    assert_eq!(result, Err(PersistenceError::EventNotFound(999)));
}

#[test]
fn test_delete_event_removes_it_from_the_calendar() {
    let mut persistence: Persistence = create_test_persistence();
    let customer_id: i64 = create_test_customer(&mut persistence, "c1");

    let event_id: i64 = persistence
        .create_event("2025-06-01", "Wedding", customer_id)
        .unwrap();

    persistence.delete_event(event_id).unwrap();

    assert!(persistence.get_event_by_id(event_id).unwrap().is_none());
    assert!(
        persistence
            .get_event_by_date("2025-06-01")
            .unwrap()
            .is_none()
    );
    assert_eq!(
        persistence.delete_event(event_id),
        Err(PersistenceError::EventNotFound(event_id))
    );
}

#[test]
fn test_list_for_requestor_filters_by_customer() {
    let mut persistence: Persistence = create_test_persistence();
    let c1: i64 = create_test_customer(&mut persistence, "c1");
    let c2: i64 = create_test_customer(&mut persistence, "c2");

    persistence.create_event("2025-06-01", "Wedding", c1).unwrap();
    persistence
        .create_event("2025-06-02", "Graduation", c2)
        .unwrap();

    let events: Vec<EventData> = persistence
        .list_events_for_requestor("2025-06-01", c1)
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Wedding");
}
