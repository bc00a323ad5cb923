// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates the field constraints for a new registration.
///
/// This function checks shape only. It does NOT check username uniqueness;
/// that is enforced by the storage layer's unique constraint.
///
/// # Errors
///
/// Returns an error if:
/// - The username is empty
/// - The email is empty or does not contain `@`
/// - The display name is empty
pub fn validate_registration_fields(
    username: &str,
    email: &str,
    display_name: &str,
) -> Result<(), DomainError> {
    // Rule: username must not be empty
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }

    // Rule: email must not be empty and must contain '@'
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must contain '@'",
        )));
    }

    // Rule: display name must not be empty
    if display_name.is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "Display name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates an event name.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn validate_event_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidEventName(String::from(
            "Event name cannot be empty",
        )));
    }

    Ok(())
}
