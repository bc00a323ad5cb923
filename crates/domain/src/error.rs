// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username is empty or invalid.
    InvalidUsername(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Display name is empty or invalid.
    InvalidDisplayName(String),
    /// Event name is empty or invalid.
    InvalidEventName(String),
    /// Role string is not a recognized role.
    InvalidRole(String),
    /// Failed to parse a calendar date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// All three staff slots of the event are already occupied.
    EventFull {
        /// The event name.
        name: String,
        /// The event date (ISO 8601).
        date: String,
    },
    /// The staff member already occupies a slot on this event.
    AlreadySignedUp {
        /// The event name.
        name: String,
        /// The event date (ISO 8601).
        date: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::InvalidEventName(msg) => write!(f, "Invalid event name: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::EventFull { name, date } => {
                write!(f, "Event '{name}' on {date} already has a full staff roster")
            }
            Self::AlreadySignedUp { name, date } => {
                write!(f, "Already signed up for event '{name}' on {date}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
