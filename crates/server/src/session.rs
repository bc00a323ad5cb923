// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and authentication middleware for the server.
//!
//! This module provides Axum extractors for validating session tokens
//! and enforcing authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use caterbook_api::{AuthenticatedUser, AuthenticationService, Identity};
use std::convert::Infallible;
use tracing::{debug, warn};

use crate::AppState;

/// Extracts the Bearer token from an `Authorization` header.
///
/// # Errors
///
/// Returns an error if the header is missing, not valid text, or not in
/// `Bearer <token>` form.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, SessionError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })
}

/// Extractor for authenticated callers.
///
/// This extractor validates the session token from the Authorization
/// header and returns the authenticated caller context.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate session token via `AuthenticationService::validate_session`
/// 3. Check session expiration
/// 4. Check the bound identity still exists
/// 5. Return `AuthenticatedUser` and `Identity`
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - Session token is invalid
/// - Session is expired
pub struct SessionUser(pub AuthenticatedUser, pub Identity);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        // Validate session
        let mut persistence = state.persistence.lock().await;
        let (user, identity) = AuthenticationService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            username = %user.username,
            role = ?user.role,
            "Session validated successfully"
        );

        Ok(Self(user, identity))
    }
}

/// Extractor for routes that serve both anonymous and authenticated
/// callers (`/` and `/register`).
///
/// A missing or invalid session folds to `None` instead of rejecting, so
/// anonymous self-registration and the public landing view keep working.
pub struct MaybeSessionUser(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for MaybeSessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(token) = bearer_token(&parts.headers) else {
            return Ok(Self(None));
        };

        let mut persistence = state.persistence.lock().await;
        match AuthenticationService::validate_session(&mut persistence, token) {
            Ok((user, _)) => Ok(Self(Some(user))),
            Err(e) => {
                debug!(error = %e, "Treating caller as anonymous");
                Ok(Self(None))
            }
        }
    }
}

/// Session extraction errors.
///
/// These errors are returned when session validation fails and are
/// automatically converted to HTTP responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
