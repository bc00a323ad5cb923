// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Caterbook event service.
//!
//! This crate is the assignment engine: it binds caller roles to calendar
//! operations. Every operation takes the caller context explicitly; there
//! is no ambient current-user state anywhere in the crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod credential_policy;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use caterbook_domain::{Identity, Role};
pub use credential_policy::{CredentialPolicy, CredentialPolicyError};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{cancel_event, home_view, register, request_event, staff_sign_up};
pub use request_response::{
    CancelEventResponse, EventSummary, HomeView, RegisterRequest, RegisterResponse,
    RequestEventRequest, RequestEventResponse, SignUpResponse,
};
