// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! These are the shapes handed to presentation; they carry ISO 8601 date
//! strings rather than `time::Date` so the server layer can serialize them
//! without further conversion.

use caterbook_persistence::EventData;
use serde::{Deserialize, Serialize};

/// A single event as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    /// The event's canonical ID.
    pub event_id: i64,
    /// The event date (ISO 8601).
    pub date: String,
    /// The event name.
    pub name: String,
    /// The requesting customer's user ID.
    pub requestor_id: i64,
    /// The first staff slot, if filled.
    pub staff1_id: Option<i64>,
    /// The second staff slot, if filled.
    pub staff2_id: Option<i64>,
    /// The third staff slot, if filled.
    pub staff3_id: Option<i64>,
}

impl From<EventData> for EventSummary {
    fn from(data: EventData) -> Self {
        Self {
            event_id: data.event_id,
            date: data.event_date,
            name: data.name,
            requestor_id: data.requestor_id,
            staff1_id: data.staff1_id,
            staff2_id: data.staff2_id,
            staff3_id: data.staff3_id,
        }
    }
}

/// The role-specific home view.
///
/// Each variant carries exactly the listings that role is allowed to see;
/// events outside a caller's visibility never leave the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum HomeView {
    /// The Owner's oversight view.
    Owner {
        /// All upcoming events, ascending by date.
        events: Vec<EventSummary>,
        /// The subset of upcoming events with no staff at all.
        understaffed: Vec<EventSummary>,
    },
    /// A staff member's view.
    Staff {
        /// Upcoming events the caller works on.
        my_events: Vec<EventSummary>,
        /// Upcoming events with an open slot the caller could claim.
        /// Disjoint from `my_events` by construction.
        available_events: Vec<EventSummary>,
    },
    /// A customer's view.
    Customer {
        /// Upcoming events the caller requested.
        requested_events: Vec<EventSummary>,
    },
}

/// API request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The unique login name.
    pub username: String,
    /// The contact email address.
    pub email: String,
    /// The human-readable display name.
    pub display_name: String,
    /// The plain-text password.
    pub password: String,
    /// The password confirmation.
    pub password_confirmation: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The new account's user ID.
    pub user_id: i64,
    /// The registered username.
    pub username: String,
    /// The assigned role (Customer or Staff).
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API request for a customer to request an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEventRequest {
    /// The event name.
    pub name: String,
    /// The requested date (`YYYY-MM-DD`).
    pub date: String,
}

/// API response for a successful event request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEventResponse {
    /// The new event's ID.
    pub event_id: i64,
    /// The event name.
    pub name: String,
    /// The event date (ISO 8601).
    pub date: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful staff sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpResponse {
    /// The event ID.
    pub event_id: i64,
    /// The event name.
    pub name: String,
    /// The event date (ISO 8601).
    pub date: String,
    /// The slot that was claimed (`staff1`, `staff2`, or `staff3`).
    pub slot: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelEventResponse {
    /// The cancelled event's ID.
    pub event_id: i64,
    /// The event name.
    pub name: String,
    /// The event date (ISO 8601).
    pub date: String,
    /// A success message.
    pub message: String,
}
