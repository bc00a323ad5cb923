// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use caterbook_domain::{Identity, Role};
use caterbook_persistence::{Persistence, PersistenceError, SessionData, UserData, verify_password};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// An authenticated caller with an associated role.
///
/// This is the explicit caller context every assignment-engine operation
/// takes; it replaces the ambient current-user state of a conventional web
/// session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The caller's canonical user ID.
    pub user_id: i64,
    /// The caller's username.
    pub username: String,
    /// The caller's role.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The caller's canonical user ID
    /// * `username` - The caller's username
    /// * `role` - The caller's role
    #[must_use]
    pub const fn new(user_id: i64, username: String, role: Role) -> Self {
        Self {
            user_id,
            username,
            role,
        }
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated caller may perform a
/// specific action based on their role. Role mismatches are reported as
/// explicit `Unauthorized` errors on this programmatic surface.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a caller is authorized to sign up for an event.
    ///
    /// Only Staff may claim event slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Staff role.
    pub fn authorize_staff_sign_up(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Staff => Ok(()),
            Role::Owner | Role::Customer => Err(AuthError::Unauthorized {
                action: String::from("staff_sign_up"),
                required_role: String::from("Staff"),
            }),
        }
    }

    /// Checks if a caller is authorized to request an event.
    ///
    /// Only Customers may request events.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Customer role.
    pub fn authorize_request_event(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Customer => Ok(()),
            Role::Owner | Role::Staff => Err(AuthError::Unauthorized {
                action: String::from("request_event"),
                required_role: String::from("Customer"),
            }),
        }
    }

    /// Checks if a caller is authorized to cancel an event.
    ///
    /// Only Customers may cancel events; requestor ownership is checked
    /// separately against the loaded event.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Customer role.
    pub fn authorize_cancel_event(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Customer => Ok(()),
            Role::Owner | Role::Staff => Err(AuthError::Unauthorized {
                action: String::from("cancel_event"),
                required_role: String::from("Customer"),
            }),
        }
    }

    /// Checks if an authenticated caller is authorized to register a staff
    /// account.
    ///
    /// Only the Owner may register staff. Anonymous self-registration is
    /// handled before this gate and always yields a Customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Owner role.
    pub fn authorize_register_staff(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Owner => Ok(()),
            Role::Staff | Role::Customer => Err(AuthError::Unauthorized {
                action: String::from("register"),
                required_role: String::from("Owner"),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by username and password and creates a session.
    ///
    /// Unknown-username and wrong-password both return the same
    /// `InvalidCredentials` error so this surface cannot be used to probe
    /// which usernames exist.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The login name (matched exactly)
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`, `identity`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser, Identity), AuthError> {
        let Some(user) = persistence
            .get_user_by_username(username)
            .map_err(Self::map_persistence_error)?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        let password_matches: bool = verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_matches {
            return Err(AuthError::InvalidCredentials);
        }

        let identity: Identity = Self::to_identity(&user)?;

        // Generate session token
        let session_token: String = Self::generate_session_token();

        // Calculate expiration time
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        // Create session
        persistence
            .create_session(&session_token, user.user_id, &expires_at_str)
            .map_err(Self::map_persistence_error)?;

        let authenticated_user: AuthenticatedUser =
            AuthenticatedUser::new(user.user_id, user.username.clone(), identity.role);

        Ok((session_token, authenticated_user, identity))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_user`, `identity`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or if the
    /// bound identity no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedUser, Identity), AuthError> {
        // Retrieve session
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Check if session is expired
        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        // Retrieve the bound identity
        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        let identity: Identity = Self::to_identity(&user)?;

        // Update session activity
        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let authenticated_user: AuthenticatedUser =
            AuthenticatedUser::new(user.user_id, user.username, identity.role);

        Ok((authenticated_user, identity))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Converts a stored user row into a domain identity.
    fn to_identity(user: &UserData) -> Result<Identity, AuthError> {
        user.to_identity()
            .map_err(|_| AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {}", user.role),
            })
    }

    /// Generates a session token.
    ///
    /// In a production system, this would use a cryptographically secure
    /// random number generator. For simplicity, we use a timestamp-based
    /// approach here.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
