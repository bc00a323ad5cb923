// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account directory mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use tracing::info;

use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new user account.
///
/// The password is hashed with bcrypt before it touches the database.
/// Username uniqueness is enforced by the table's UNIQUE constraint;
/// a violation is reported as `DuplicateUsername` rather than being
/// pre-checked, so concurrent registrations resolve to exactly one
/// success.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The unique login name (matched exactly)
/// * `email` - The contact email address
/// * `display_name` - The human-readable display name
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The role string (Owner, Staff, or Customer)
///
/// # Errors
///
/// Returns `DuplicateUsername` if the username is already taken, or
/// another error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    display_name: &str,
    password: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating user with username: {}, display_name: {}, role: {}",
        username, display_name, role
    );

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let insert_result: Result<usize, diesel::result::Error> = diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::email.eq(email),
            users::display_name.eq(display_name),
            users::password_hash.eq(&password_hash),
            users::role.eq(role),
        ))
        .execute(conn);

    match insert_result {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DuplicateUsername {
                username: username.to_owned(),
            });
        }
        Err(e) => return Err(PersistenceError::from(e)),
    }

    let user_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}
