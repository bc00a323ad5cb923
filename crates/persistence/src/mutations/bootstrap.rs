// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! First-run bootstrap provisioning.
//!
//! On an empty database exactly one Owner identity is created with a fixed
//! username and initial credential. The Owner role can never be created
//! through registration, so this is the only path that produces it.

use diesel::Connection;
use diesel::SqliteConnection;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::users::create_user;
use crate::queries::users::count_users;

/// The fixed login name of the bootstrap Owner account.
pub const OWNER_USERNAME: &str = "owner";

/// The fixed contact address of the bootstrap Owner account.
const OWNER_EMAIL: &str = "owner@gmail.com";

/// The fixed display name of the bootstrap Owner account.
const OWNER_DISPLAY_NAME: &str = "Owner";

/// The fixed initial credential of the bootstrap Owner account.
const OWNER_INITIAL_PASSWORD: &str = "pass";

/// Provisions the Owner account on first initialization.
///
/// The check and the insert run in one transaction so that two racing
/// initializations produce a single Owner. Calling this against an already
/// provisioned database is a no-op.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// The new Owner's user ID, or `None` if the database already has users.
///
/// # Errors
///
/// Returns an error if the count or the insert fails.
pub fn ensure_owner_account(
    conn: &mut SqliteConnection,
) -> Result<Option<i64>, PersistenceError> {
    conn.transaction(|conn| {
        let user_count: i64 = count_users(conn)?;
        if user_count > 0 {
            return Ok(None);
        }

        let owner_id: i64 = create_user(
            conn,
            OWNER_USERNAME,
            OWNER_EMAIL,
            OWNER_DISPLAY_NAME,
            OWNER_INITIAL_PASSWORD,
            "Owner",
        )?;

        info!(owner_id, "Bootstrapped Owner account");
        Ok(Some(owner_id))
    })
}
