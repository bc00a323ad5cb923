// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential policy validation.
//!
//! This module enforces the password requirements for registration.

use thiserror::Error;

/// Credential policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialPolicyError {
    /// Password is empty.
    #[error("Password cannot be empty")]
    EmptyPassword,

    /// Password and confirmation do not match.
    #[error("The passwords do not match")]
    ConfirmationMismatch,
}

/// Credential policy for new registrations.
#[derive(Debug, Default)]
pub struct CredentialPolicy;

impl CredentialPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `confirmation` - The password confirmation
    ///
    /// # Errors
    ///
    /// Returns a `CredentialPolicyError` if the password is empty or does
    /// not match its confirmation.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
    ) -> Result<(), CredentialPolicyError> {
        if password.is_empty() {
            return Err(CredentialPolicyError::EmptyPassword);
        }

        if password != confirmation {
            return Err(CredentialPolicyError::ConfirmationMismatch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let policy: CredentialPolicy = CredentialPolicy;
        assert!(policy.validate("pass", "pass").is_ok());
    }

    #[test]
    fn test_empty_password() {
        let policy: CredentialPolicy = CredentialPolicy;
        assert_eq!(
            policy.validate("", ""),
            Err(CredentialPolicyError::EmptyPassword)
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        let policy: CredentialPolicy = CredentialPolicy;
        assert_eq!(
            policy.validate("pass", "pass2"),
            Err(CredentialPolicyError::ConfirmationMismatch)
        );
    }
}
