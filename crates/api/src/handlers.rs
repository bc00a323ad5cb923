// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment engine workflow operations.
//!
//! Each operation is gated by the caller's role, which arrives as an
//! explicit [`AuthenticatedUser`] resolved once per request by the session
//! layer. The `as_of` date for upcoming-event queries is likewise passed
//! in by the caller, computed fresh from the wall clock per request.

use caterbook_domain::{
    Event, Role, Slot, format_event_date, parse_event_date, validate_event_name,
    validate_registration_fields,
};
use caterbook_persistence::{EventData, Persistence};
use time::Date;
use tracing::info;

use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::credential_policy::CredentialPolicy;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CancelEventResponse, EventSummary, HomeView, RegisterRequest, RegisterResponse,
    RequestEventRequest, RequestEventResponse, SignUpResponse,
};

/// Builds the role-specific home view for the caller.
///
/// - Owner: all upcoming events plus the understaffed subset.
/// - Staff: the caller's own assignments plus events still open to them.
/// - Customer: the caller's own requests.
///
/// Pure read; no state changes.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `user` - The authenticated caller
/// * `as_of` - The inclusive lower bound of the upcoming window
///
/// # Errors
///
/// Returns an error if a calendar query fails.
pub fn home_view(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    as_of: Date,
) -> Result<HomeView, ApiError> {
    let as_of_str: String = format_event_date(as_of);

    let view: HomeView = match user.role {
        Role::Owner => {
            let events: Vec<EventSummary> = persistence
                .list_upcoming(&as_of_str)
                .map_err(translate_persistence_error)?
                .into_iter()
                .map(EventSummary::from)
                .collect();
            let understaffed: Vec<EventSummary> = persistence
                .list_understaffed(&as_of_str)
                .map_err(translate_persistence_error)?
                .into_iter()
                .map(EventSummary::from)
                .collect();
            HomeView::Owner {
                events,
                understaffed,
            }
        }
        Role::Staff => {
            let my_events: Vec<EventSummary> = persistence
                .list_events_for_staff(&as_of_str, user.user_id)
                .map_err(translate_persistence_error)?
                .into_iter()
                .map(EventSummary::from)
                .collect();
            let available_events: Vec<EventSummary> = persistence
                .list_available_events_for_staff(&as_of_str, user.user_id)
                .map_err(translate_persistence_error)?
                .into_iter()
                .map(EventSummary::from)
                .collect();
            HomeView::Staff {
                my_events,
                available_events,
            }
        }
        Role::Customer => {
            let requested_events: Vec<EventSummary> = persistence
                .list_events_for_requestor(&as_of_str, user.user_id)
                .map_err(translate_persistence_error)?
                .into_iter()
                .map(EventSummary::from)
                .collect();
            HomeView::Customer { requested_events }
        }
    };

    Ok(view)
}

/// Signs the caller up for one staff slot of an event.
///
/// The first empty slot in fill order is claimed. A caller who already
/// occupies a slot on the event is rejected rather than double-booked,
/// and a full event is rejected rather than silently overwritten.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The target event
/// * `user` - The authenticated caller
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not Staff
/// - The event does not exist
/// - The caller already occupies a slot on the event
/// - All three slots are occupied
pub fn staff_sign_up(
    persistence: &mut Persistence,
    event_id: i64,
    user: &AuthenticatedUser,
) -> Result<SignUpResponse, ApiError> {
    AuthorizationService::authorize_staff_sign_up(user)?;

    let data: EventData = persistence
        .get_event_by_id(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            resource_type: String::from("Event"),
            message: format!("Event {event_id} does not exist"),
        })?;

    let mut event: Event = data.to_event().map_err(translate_domain_error)?;

    // The slot decision lives in the domain rules; persistence only
    // writes the column the engine chose.
    let slot: Slot = event
        .assign_staff(user.user_id)
        .map_err(translate_domain_error)?;

    persistence
        .set_event_staff(event_id, slot, user.user_id)
        .map_err(translate_persistence_error)?;

    let date: String = format_event_date(event.date);

    info!(
        event_id,
        user_id = user.user_id,
        slot = slot.as_str(),
        "Staff signed up for event"
    );

    Ok(SignUpResponse {
        event_id,
        name: event.name.clone(),
        date: date.clone(),
        slot: slot.as_str().to_owned(),
        message: format!("You have signed up for {} on {}.", event.name, date),
    })
}

/// Creates a new event requested by the caller.
///
/// Date exclusivity rests on the storage constraint: the insert either
/// wins the date or reports `DateUnavailable`, with no pre-check window.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The event name and date string
/// * `user` - The authenticated caller
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a Customer
/// - The name is empty
/// - The date string is not a valid `YYYY-MM-DD` date
/// - The date already has an event
pub fn request_event(
    persistence: &mut Persistence,
    request: &RequestEventRequest,
    user: &AuthenticatedUser,
) -> Result<RequestEventResponse, ApiError> {
    AuthorizationService::authorize_request_event(user)?;

    validate_event_name(&request.name).map_err(translate_domain_error)?;

    let date: Date = parse_event_date(&request.date).map_err(translate_domain_error)?;
    let date_str: String = format_event_date(date);

    let event_id: i64 = persistence
        .create_event(&date_str, &request.name, user.user_id)
        .map_err(translate_persistence_error)?;

    info!(
        event_id,
        user_id = user.user_id,
        date = %date_str,
        "Customer requested event"
    );

    Ok(RequestEventResponse {
        event_id,
        name: request.name.clone(),
        date: date_str.clone(),
        message: format!(
            "Event {} on {} was successfully created.",
            request.name, date_str
        ),
    })
}

/// Cancels an event requested by the caller.
///
/// Only the original requestor may cancel; anyone else leaves the event
/// untouched and receives an explicit rejection.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The target event
/// * `user` - The authenticated caller
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a Customer
/// - The event does not exist
/// - The caller is not the event's requestor
pub fn cancel_event(
    persistence: &mut Persistence,
    event_id: i64,
    user: &AuthenticatedUser,
) -> Result<CancelEventResponse, ApiError> {
    AuthorizationService::authorize_cancel_event(user)?;

    let data: EventData = persistence
        .get_event_by_id(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            resource_type: String::from("Event"),
            message: format!("Event {event_id} does not exist"),
        })?;

    if data.requestor_id != user.user_id {
        return Err(ApiError::Unauthorized {
            action: String::from("cancel_event"),
            required_role: String::from("requestor"),
        });
    }

    persistence
        .delete_event(event_id)
        .map_err(translate_persistence_error)?;

    info!(event_id, user_id = user.user_id, "Customer cancelled event");

    Ok(CancelEventResponse {
        event_id,
        name: data.name.clone(),
        date: data.event_date.clone(),
        message: format!(
            "You have canceled the event {} on {}.",
            data.name, data.event_date
        ),
    })
}

/// Registers a new account.
///
/// Anonymous callers always register Customers; the authenticated Owner
/// registers Staff. Authenticated Staff and Customers may not register
/// accounts at all, and no path through here can ever produce an Owner.
/// Username uniqueness rests on the storage constraint.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The registration fields
/// * `current` - The authenticated caller, if any
///
/// # Errors
///
/// Returns an error if:
/// - The caller is authenticated but not the Owner
/// - Any field validation fails
/// - The password is empty or does not match its confirmation
/// - The username is already taken
pub fn register(
    persistence: &mut Persistence,
    request: &RegisterRequest,
    current: Option<&AuthenticatedUser>,
) -> Result<RegisterResponse, ApiError> {
    let new_role: Role = match current {
        None => Role::Customer,
        Some(user) => {
            AuthorizationService::authorize_register_staff(user)?;
            Role::Staff
        }
    };

    validate_registration_fields(&request.username, &request.email, &request.display_name)
        .map_err(translate_domain_error)?;

    CredentialPolicy.validate(&request.password, &request.password_confirmation)?;

    let user_id: i64 = persistence
        .create_user(
            &request.username,
            &request.email,
            &request.display_name,
            &request.password,
            new_role.as_str(),
        )
        .map_err(translate_persistence_error)?;

    info!(
        user_id,
        username = %request.username,
        role = new_role.as_str(),
        "Registered new account"
    );

    let message: String = match new_role {
        Role::Staff => String::from("You successfully registered a staff."),
        Role::Owner | Role::Customer => {
            String::from("You were successfully registered and can login now.")
        }
    };

    Ok(RegisterResponse {
        user_id,
        username: request.username.clone(),
        role: new_role.as_str().to_owned(),
        message,
    })
}
