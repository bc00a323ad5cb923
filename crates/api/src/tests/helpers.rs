// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use caterbook_domain::Role;
use caterbook_persistence::{OWNER_USERNAME, Persistence};
use time::Date;
use time::macros::date;

use crate::auth::AuthenticatedUser;
use crate::handlers::register;
use crate::request_response::{RegisterRequest, RequestEventRequest};

/// A fixed as-of date all workflow tests pin their calendars to.
pub fn test_as_of() -> Date {
    date!(2025 - 05 - 01)
}

pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence
        .ensure_owner_account()
        .expect("Failed to bootstrap owner");
    persistence
}

pub fn owner_user(persistence: &mut Persistence) -> AuthenticatedUser {
    let owner = persistence
        .get_user_by_username(OWNER_USERNAME)
        .expect("Owner lookup failed")
        .expect("Owner should be bootstrapped");
    AuthenticatedUser::new(owner.user_id, owner.username, Role::Owner)
}

pub fn create_register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        display_name: format!("Test {username}"),
        password: String::from("pass"),
        password_confirmation: String::from("pass"),
    }
}

/// Registers a customer through the anonymous self-registration path.
pub fn create_customer(persistence: &mut Persistence, username: &str) -> AuthenticatedUser {
    let response = register(persistence, &create_register_request(username), None)
        .expect("Customer registration failed");
    AuthenticatedUser::new(response.user_id, username.to_owned(), Role::Customer)
}

/// Registers a staff member through the Owner registration path.
pub fn create_staff(persistence: &mut Persistence, username: &str) -> AuthenticatedUser {
    let owner: AuthenticatedUser = owner_user(persistence);
    let response = register(persistence, &create_register_request(username), Some(&owner))
        .expect("Staff registration failed");
    AuthenticatedUser::new(response.user_id, username.to_owned(), Role::Staff)
}

pub fn create_event_request(name: &str, date: &str) -> RequestEventRequest {
    RequestEventRequest {
        name: name.to_owned(),
        date: date.to_owned(),
    }
}
