// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::credential_policy::CredentialPolicyError;
use caterbook_domain::DomainError;
use caterbook_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login failed.
    ///
    /// Unknown-username and wrong-password are deliberately reported with
    /// this single variant so the login surface cannot be used to
    /// enumerate usernames.
    InvalidCredentials,
    /// Session validation or auth plumbing failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "Invalid username or password")
            }
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract. Every workflow failure is recovered into one of these
/// variants and surfaced as a user-visible message; none propagates as an
/// unhandled fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Login failed (unified message, see `AuthError::InvalidCredentials`).
    InvalidCredentials,
    /// Session validation or auth plumbing failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the caller does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    ValidationFailed {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The username is already taken.
    DuplicateUsername {
        /// The conflicting username.
        username: String,
    },
    /// The chosen date already has an event.
    DateUnavailable {
        /// The conflicting date (ISO 8601).
        date: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// All three staff slots of the event are occupied.
    EventFull {
        /// The event name.
        name: String,
        /// The event date (ISO 8601).
        date: String,
    },
    /// The staff member already occupies a slot on the event.
    AlreadySignedUp {
        /// The event name.
        name: String,
        /// The event date (ISO 8601).
        date: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "Invalid username or password")
            }
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ValidationFailed { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DuplicateUsername { username } => {
                write!(f, "The username '{username}' is already taken")
            }
            Self::DateUnavailable { date } => {
                write!(f, "The chosen date {date} is not available")
            }
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::EventFull { name, date } => {
                write!(f, "Event '{name}' on {date} already has a full staff roster")
            }
            Self::AlreadySignedUp { name, date } => {
                write!(f, "You are already signed up for '{name}' on {date}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CredentialPolicyError> for ApiError {
    fn from(err: CredentialPolicyError) -> Self {
        Self::ValidationFailed {
            field: String::from("password"),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidUsername(msg) => ApiError::ValidationFailed {
            field: String::from("username"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::ValidationFailed {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidDisplayName(msg) => ApiError::ValidationFailed {
            field: String::from("display_name"),
            message: msg,
        },
        DomainError::InvalidEventName(msg) => ApiError::ValidationFailed {
            field: String::from("name"),
            message: msg,
        },
        // Role strings are assigned by the engine, never typed by callers;
        // a parse failure means the stored value is corrupt.
        DomainError::InvalidRole(msg) => ApiError::Internal { message: msg },
        DomainError::DateParseError { date_string, error } => ApiError::ValidationFailed {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::EventFull { name, date } => ApiError::EventFull { name, date },
        DomainError::AlreadySignedUp { name, date } => ApiError::AlreadySignedUp { name, date },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage-level uniqueness conflicts become the matching API conflicts;
/// everything else is an internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateUsername { username } => {
            ApiError::DuplicateUsername { username }
        }
        PersistenceError::DateUnavailable { date } => ApiError::DateUnavailable { date },
        PersistenceError::EventNotFound(event_id) => ApiError::NotFound {
            resource_type: String::from("Event"),
            message: format!("Event {event_id} does not exist"),
        },
        PersistenceError::UserNotFound(msg) => ApiError::NotFound {
            resource_type: String::from("User"),
            message: msg,
        },
        _ => ApiError::Internal {
            message: format!("Persistence error: {err}"),
        },
    }
}
