// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event calendar mutations.

use caterbook_domain::Slot;
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use tracing::{debug, info};

use crate::diesel_schema::events;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new event with all staff slots empty.
///
/// Date exclusivity is enforced by the table's UNIQUE constraint on
/// `event_date`; a violation is reported as `DateUnavailable` rather than
/// being pre-checked, so concurrent requests for the same date resolve to
/// exactly one success.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_date` - The event date (ISO 8601)
/// * `name` - The event name
/// * `requestor_id` - The requesting customer's user ID
///
/// # Errors
///
/// Returns `DateUnavailable` if the date already has an event, or another
/// error if the insert fails.
pub fn create_event(
    conn: &mut SqliteConnection,
    event_date: &str,
    name: &str,
    requestor_id: i64,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating event '{}' on {} for requestor ID {}",
        name, event_date, requestor_id
    );

    let insert_result: Result<usize, diesel::result::Error> = diesel::insert_into(events::table)
        .values((
            events::event_date.eq(event_date),
            events::name.eq(name),
            events::requestor_id.eq(requestor_id),
        ))
        .execute(conn);

    match insert_result {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DateUnavailable {
                date: event_date.to_owned(),
            });
        }
        Err(e) => return Err(PersistenceError::from(e)),
    }

    let event_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(event_id, "Event created successfully");

    Ok(event_id)
}

/// Writes one staff slot of an event.
///
/// The slot choice (first empty in fill order) is made by the assignment
/// engine; this mutation only persists it.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
/// * `slot` - The slot to write
/// * `user_id` - The staff member's user ID
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, or another error
/// if the update fails.
pub fn set_event_staff(
    conn: &mut SqliteConnection,
    event_id: i64,
    slot: Slot,
    user_id: i64,
) -> Result<(), PersistenceError> {
    debug!(
        "Assigning user ID {} to {} of event ID {}",
        user_id,
        slot.as_str(),
        event_id
    );

    let rows_affected: usize = match slot {
        Slot::First => diesel::update(events::table)
            .filter(events::event_id.eq(event_id))
            .set(events::staff1_id.eq(Some(user_id)))
            .execute(conn)?,
        Slot::Second => diesel::update(events::table)
            .filter(events::event_id.eq(event_id))
            .set(events::staff2_id.eq(Some(user_id)))
            .execute(conn)?,
        Slot::Third => diesel::update(events::table)
            .filter(events::event_id.eq(event_id))
            .set(events::staff3_id.eq(Some(user_id)))
            .execute(conn)?,
    };

    if rows_affected == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }

    Ok(())
}

/// Deletes an event.
///
/// There are no cascading side effects on identities.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, or another error
/// if the delete fails.
pub fn delete_event(conn: &mut SqliteConnection, event_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting event ID: {}", event_id);

    let rows_affected: usize = diesel::delete(events::table)
        .filter(events::event_id.eq(event_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }

    Ok(())
}
