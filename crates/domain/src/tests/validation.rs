// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, validate_event_name, validate_registration_fields};

#[test]
fn test_validate_registration_fields_accepts_valid_input() {
    let result: Result<(), DomainError> =
        validate_registration_fields("c1", "c1@example.com", "Customer One");
    assert!(result.is_ok());
}

#[test]
fn test_validate_registration_fields_rejects_empty_username() {
    let result: Result<(), DomainError> =
        validate_registration_fields("", "c1@example.com", "Customer One");
    assert!(matches!(result, Err(DomainError::InvalidUsername(_))));
}

#[test]
fn test_validate_registration_fields_rejects_empty_email() {
    let result: Result<(), DomainError> = validate_registration_fields("c1", "", "Customer One");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_registration_fields_rejects_email_without_at_sign() {
    let result: Result<(), DomainError> =
        validate_registration_fields("c1", "c1.example.com", "Customer One");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_registration_fields_rejects_empty_display_name() {
    let result: Result<(), DomainError> =
        validate_registration_fields("c1", "c1@example.com", "");
    assert!(matches!(result, Err(DomainError::InvalidDisplayName(_))));
}

#[test]
fn test_validate_event_name_rejects_empty_name() {
    assert!(validate_event_name("Wedding").is_ok());
    assert!(matches!(
        validate_event_name(""),
        Err(DomainError::InvalidEventName(_))
    ));
}
