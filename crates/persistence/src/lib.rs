// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Caterbook event service.
//!
//! This crate provides `SQLite` persistence for the account directory, the
//! event calendar, and sessions. It is built on Diesel with embedded
//! migrations.
//!
//! ## Uniqueness invariants
//!
//! Username and event-date exclusivity are enforced by UNIQUE constraints
//! in the schema, not by check-then-insert in application logic. The
//! mutation sites translate constraint violations into the typed conflict
//! errors `DuplicateUsername` and `DateUnavailable`, so two racing writers
//! always resolve to one success and one reportable conflict.
//!
//! ## Testing
//!
//! In-memory databases receive unique names from an atomic counter, giving
//! deterministic test isolation without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use caterbook_domain::Slot;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{EventData, SessionData, UserData};
pub use error::PersistenceError;
pub use mutations::bootstrap::OWNER_USERNAME;
pub use queries::users::verify_password;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the account directory, event calendar, and
/// sessions.
///
/// The adapter owns a single `SQLite` connection; callers serialize access
/// to it (the server wraps it in an async mutex), which gives the system
/// its single-writer transactional commit semantics.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ------------------------------------------------------------------
    // Account directory
    // ------------------------------------------------------------------

    /// Provisions the Owner account if the database has no users yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the bootstrap transaction fails.
    pub fn ensure_owner_account(&mut self) -> Result<Option<i64>, PersistenceError> {
        mutations::bootstrap::ensure_owner_account(&mut self.conn)
    }

    /// Creates a new user account, hashing the password with bcrypt.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is already taken.
    pub fn create_user(
        &mut self,
        username: &str,
        email: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, email, display_name, password, role)
    }

    /// Retrieves a user by username (exact match).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; `Ok(None)` if not found.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; `Ok(None)` if not found.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Counts the total number of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    // ------------------------------------------------------------------
    // Event calendar
    // ------------------------------------------------------------------

    /// Creates a new event with all staff slots empty.
    ///
    /// # Errors
    ///
    /// Returns `DateUnavailable` if the date already has an event.
    pub fn create_event(
        &mut self,
        event_date: &str,
        name: &str,
        requestor_id: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::events::create_event(&mut self.conn, event_date, name, requestor_id)
    }

    /// Retrieves an event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; `Ok(None)` if not found.
    pub fn get_event_by_id(
        &mut self,
        event_id: i64,
    ) -> Result<Option<EventData>, PersistenceError> {
        queries::events::get_event_by_id(&mut self.conn, event_id)
    }

    /// Retrieves the event on a given date, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; `Ok(None)` if the date is free.
    pub fn get_event_by_date(
        &mut self,
        event_date: &str,
    ) -> Result<Option<EventData>, PersistenceError> {
        queries::events::get_event_by_date(&mut self.conn, event_date)
    }

    /// Lists all upcoming events (date ≥ `as_of`), ascending by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_upcoming(&mut self, as_of: &str) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_upcoming(&mut self.conn, as_of)
    }

    /// Lists upcoming events with all three staff slots empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_understaffed(&mut self, as_of: &str) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_understaffed(&mut self.conn, as_of)
    }

    /// Lists upcoming events where the given staff member occupies a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events_for_staff(
        &mut self,
        as_of: &str,
        user_id: i64,
    ) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_for_staff(&mut self.conn, as_of, user_id)
    }

    /// Lists upcoming events the given staff member could still claim.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_available_events_for_staff(
        &mut self,
        as_of: &str,
        user_id: i64,
    ) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_available_for_staff(&mut self.conn, as_of, user_id)
    }

    /// Lists upcoming events requested by the given customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events_for_requestor(
        &mut self,
        as_of: &str,
        user_id: i64,
    ) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_for_requestor(&mut self.conn, as_of, user_id)
    }

    /// Writes one staff slot of an event.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event does not exist.
    pub fn set_event_staff(
        &mut self,
        event_id: i64,
        slot: Slot,
        user_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::events::set_event_staff(&mut self.conn, event_id, slot, user_id)
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event does not exist.
    pub fn delete_event(&mut self, event_id: i64) -> Result<(), PersistenceError> {
        mutations::events::delete_event(&mut self.conn, event_id)
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Creates a new session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; `Ok(None)` if not found.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn)
    }
}
