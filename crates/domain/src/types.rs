// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the role of an identity.
///
/// Roles determine which calendar operations an identity may perform.
/// A role is assigned once at registration and never changes:
/// anonymous self-registration yields `Customer`, Owner-initiated
/// registration yields `Staff`, and the single `Owner` exists only via
/// bootstrap provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The business owner: sees every upcoming event and the understaffed
    /// warning list, and registers staff accounts.
    Owner,
    /// A staff member: sees their own assignments plus events with an open
    /// slot, and may claim one slot per event.
    Staff,
    /// A customer: requests events on open dates and may cancel events
    /// they requested.
    Customer,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(Self::Owner),
            "Staff" => Ok(Self::Staff),
            "Customer" => Ok(Self::Customer),
            _ => Err(DomainError::InvalidRole(format!("Unknown role: {s}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Staff => "Staff",
            Self::Customer => "Customer",
        }
    }
}

/// Represents a user identity.
///
/// `user_id` is the canonical internal identifier. The username is unique
/// across all identities and is matched exactly (no normalization).
/// The credential hash is a persistence-layer concern and never appears on
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub user_id: Option<i64>,
    /// The unique login name.
    pub username: String,
    /// The contact email address.
    pub email: String,
    /// The human-readable display name (informational, not unique).
    pub display_name: String,
    /// The identity's role.
    pub role: Role,
}

impl Identity {
    /// Creates a new `Identity` without a persisted `user_id`.
    ///
    /// The `user_id` will be assigned by the persistence layer upon first
    /// save.
    #[must_use]
    pub const fn new(username: String, email: String, display_name: String, role: Role) -> Self {
        Self {
            user_id: None,
            username,
            email,
            display_name,
            role,
        }
    }

    /// Creates an `Identity` with an existing `user_id` (from persistence).
    #[must_use]
    pub const fn with_id(
        user_id: i64,
        username: String,
        email: String,
        display_name: String,
        role: Role,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            username,
            email,
            display_name,
            role,
        }
    }
}
