// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event calendar queries.
//!
//! Dates are stored as ISO 8601 text, so every range filter and ordering
//! below is a plain lexicographic comparison. The `as_of` parameter is the
//! inclusive lower bound of the upcoming window; callers compute it fresh
//! from the wall clock on every request.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::EventData;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    event_date: String,
    name: String,
    requestor_id: i64,
    staff1_id: Option<i64>,
    staff2_id: Option<i64>,
    staff3_id: Option<i64>,
}

impl From<EventRow> for EventData {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            event_date: row.event_date,
            name: row.name,
            requestor_id: row.requestor_id,
            staff1_id: row.staff1_id,
            staff2_id: row.staff2_id,
            staff3_id: row.staff3_id,
        }
    }
}

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn get_event_by_id(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<EventData>, PersistenceError> {
    debug!("Looking up event by ID: {}", event_id);

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the event on a given date, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the date has no event.
pub fn get_event_by_date(
    conn: &mut SqliteConnection,
    event_date: &str,
) -> Result<Option<EventData>, PersistenceError> {
    debug!("Looking up event by date: {}", event_date);

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_date.eq(event_date))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all upcoming events, ascending by date.
///
/// An event is upcoming if its date is on or after `as_of`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_upcoming(
    conn: &mut SqliteConnection,
    as_of: &str,
) -> Result<Vec<EventData>, PersistenceError> {
    debug!("Listing upcoming events as of {}", as_of);

    let rows: Vec<EventRow> = events::table
        .filter(events::event_date.ge(as_of))
        .order_by(events::event_date.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}

/// Lists upcoming events with no staff assigned at all.
///
/// This feeds the owner's understaffed warning view.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_understaffed(
    conn: &mut SqliteConnection,
    as_of: &str,
) -> Result<Vec<EventData>, PersistenceError> {
    debug!("Listing understaffed events as of {}", as_of);

    let rows: Vec<EventRow> = events::table
        .filter(events::event_date.ge(as_of))
        .filter(events::staff1_id.is_null())
        .filter(events::staff2_id.is_null())
        .filter(events::staff3_id.is_null())
        .order_by(events::event_date.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}

/// Lists upcoming events where the given staff member occupies a slot.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_for_staff(
    conn: &mut SqliteConnection,
    as_of: &str,
    user_id: i64,
) -> Result<Vec<EventData>, PersistenceError> {
    debug!("Listing events staffed by user ID {} as of {}", user_id, as_of);

    let rows: Vec<EventRow> = events::table
        .filter(events::event_date.ge(as_of))
        .filter(
            events::staff1_id
                .eq(Some(user_id))
                .or(events::staff2_id.eq(Some(user_id)))
                .or(events::staff3_id.eq(Some(user_id))),
        )
        .order_by(events::event_date.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}

/// Lists upcoming events the given staff member could still claim.
///
/// An event is available when its third slot is empty and the staff member
/// occupies none of the three slots. Empty slots are NULL, so the
/// inequality filters carry explicit `IS NULL` branches; the third slot
/// being empty already rules the caller out of it. By construction this
/// listing is disjoint from [`list_for_staff`].
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_available_for_staff(
    conn: &mut SqliteConnection,
    as_of: &str,
    user_id: i64,
) -> Result<Vec<EventData>, PersistenceError> {
    debug!(
        "Listing events available to user ID {} as of {}",
        user_id, as_of
    );

    let rows: Vec<EventRow> = events::table
        .filter(events::event_date.ge(as_of))
        .filter(events::staff3_id.is_null())
        .filter(
            events::staff1_id
                .ne(Some(user_id))
                .or(events::staff1_id.is_null()),
        )
        .filter(
            events::staff2_id
                .ne(Some(user_id))
                .or(events::staff2_id.is_null()),
        )
        .order_by(events::event_date.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}

/// Lists upcoming events requested by the given customer.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_for_requestor(
    conn: &mut SqliteConnection,
    as_of: &str,
    user_id: i64,
) -> Result<Vec<EventData>, PersistenceError> {
    debug!(
        "Listing events requested by user ID {} as of {}",
        user_id, as_of
    );

    let rows: Vec<EventRow> = events::table
        .filter(events::event_date.ge(as_of))
        .filter(events::requestor_id.eq(user_id))
        .order_by(events::event_date.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}
