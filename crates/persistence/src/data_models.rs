// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caterbook_domain::{DomainError, Event, Identity, parse_event_date};
use serde::{Deserialize, Serialize};

/// Serializable representation of a user row.
///
/// Unlike the domain `Identity`, this carries the stored credential hash
/// and keeps the role as its database string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl UserData {
    /// Converts this row into a domain `Identity`, shedding the credential
    /// hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role string is not a recognized
    /// role, which indicates external tampering with the database.
    pub fn to_identity(&self) -> Result<Identity, DomainError> {
        Ok(Identity::with_id(
            self.user_id,
            self.username.clone(),
            self.email.clone(),
            self.display_name.clone(),
            self.role.parse()?,
        ))
    }
}

/// Serializable representation of a session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Serializable representation of an event row.
///
/// Dates stay in their ISO 8601 text form at this layer; conversion to a
/// `time::Date` happens at the domain boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: i64,
    pub event_date: String,
    pub name: String,
    pub requestor_id: i64,
    pub staff1_id: Option<i64>,
    pub staff2_id: Option<i64>,
    pub staff3_id: Option<i64>,
}

impl EventData {
    /// Converts this row into a domain `Event`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date text does not parse. The
    /// migration only ever stores dates rendered by the domain formatter,
    /// so a failure here indicates external tampering with the database.
    pub fn to_event(&self) -> Result<Event, DomainError> {
        Ok(Event::with_id(
            self.event_id,
            parse_event_date(&self.event_date)?,
            self.name.clone(),
            self.requestor_id,
            self.staff1_id,
            self.staff2_id,
            self.staff3_id,
        ))
    }
}
