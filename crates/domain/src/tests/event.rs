// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Event, Slot};
use time::Date;
use time::macros::date;

fn create_test_event(event_date: Date) -> Event {
    Event::with_id(1, event_date, String::from("Wedding"), 10, None, None, None)
}

#[test]
fn test_assign_staff_fills_slots_in_order() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));

    assert_eq!(event.assign_staff(21), Ok(Slot::First));
    assert_eq!(event.assign_staff(22), Ok(Slot::Second));
    assert_eq!(event.assign_staff(23), Ok(Slot::Third));

    assert_eq!(event.staff1_id, Some(21));
    assert_eq!(event.staff2_id, Some(22));
    assert_eq!(event.staff3_id, Some(23));
}

#[test]
fn test_assign_staff_uses_first_empty_slot() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));
    event.staff1_id = Some(21);

    assert_eq!(event.assign_staff(22), Ok(Slot::Second));
    assert_eq!(event.staff1_id, Some(21));
    assert_eq!(event.staff2_id, Some(22));
    assert_eq!(event.staff3_id, None);
}

#[test]
fn test_assign_staff_rejects_duplicate_occupant() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));

    assert_eq!(event.assign_staff(21), Ok(Slot::First));
    let result: Result<Slot, DomainError> = event.assign_staff(21);

    assert!(matches!(result, Err(DomainError::AlreadySignedUp { .. })));
    // The second attempt must not have created a second slot entry.
    assert_eq!(event.staff1_id, Some(21));
    assert_eq!(event.staff2_id, None);
    assert_eq!(event.staff3_id, None);
}

#[test]
fn test_assign_staff_rejects_full_event() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));
    event.staff1_id = Some(21);
    event.staff2_id = Some(22);
    event.staff3_id = Some(23);

    let result: Result<Slot, DomainError> = event.assign_staff(24);

    assert!(matches!(result, Err(DomainError::EventFull { .. })));
    // The occupant of the third slot must never be overwritten.
    assert_eq!(event.staff3_id, Some(23));
}

#[test]
fn test_first_open_slot_on_empty_event() {
    let event: Event = create_test_event(date!(2025 - 06 - 01));
    assert_eq!(event.first_open_slot(), Some(Slot::First));
}

#[test]
fn test_first_open_slot_on_full_event() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));
    event.staff1_id = Some(21);
    event.staff2_id = Some(22);
    event.staff3_id = Some(23);

    assert_eq!(event.first_open_slot(), None);
    assert!(event.is_full());
}

#[test]
fn test_understaffed_requires_all_slots_empty() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));
    assert!(event.is_understaffed());

    event.staff2_id = Some(22);
    assert!(!event.is_understaffed());
}

#[test]
fn test_occupies_slot_matches_any_position() {
    let mut event: Event = create_test_event(date!(2025 - 06 - 01));
    event.staff3_id = Some(23);

    assert!(event.occupies_slot(23));
    assert!(!event.occupies_slot(21));
}

#[test]
fn test_upcoming_boundary_includes_as_of_day() {
    let event: Event = create_test_event(date!(2025 - 06 - 01));

    // The as-of day itself is upcoming; the day before is not.
    assert!(event.is_upcoming(date!(2025 - 06 - 01)));
    assert!(event.is_upcoming(date!(2025 - 05 - 31)));
    assert!(!event.is_upcoming(date!(2025 - 06 - 02)));
}

#[test]
fn test_slot_as_str() {
    assert_eq!(Slot::First.as_str(), "staff1");
    assert_eq!(Slot::Second.as_str(), "staff2");
    assert_eq!(Slot::Third.as_str(), "staff3");
}
