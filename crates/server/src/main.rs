// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use caterbook_api::{
    ApiError, AuthenticationService, CancelEventResponse, HomeView, RegisterRequest,
    RegisterResponse, RequestEventRequest, RequestEventResponse, SignUpResponse, cancel_event,
    home_view, register, request_event, staff_sign_up,
};
use caterbook_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::info;

mod session;

use session::{MaybeSessionUser, SessionUser, bearer_token};

/// Caterbook Server - HTTP server for the Caterbook event service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access; holding the lock across each operation is what
/// gives the system its single-writer commit semantics.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for accounts, events, and sessions.
    pub persistence: Arc<Mutex<Persistence>>,
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The login name.
    username: String,
    /// The plain-text password.
    password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoginApiResponse {
    /// The session token to present as `Authorization: Bearer <token>`.
    session_token: String,
    /// The caller's username.
    username: String,
    /// The caller's display name.
    display_name: String,
    /// The caller's role.
    role: String,
}

/// API response for the home route.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HomeApiResponse {
    /// Whether the caller presented a valid session.
    authenticated: bool,
    /// The role-specific view, absent for anonymous callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<HomeView>,
}

/// API response for logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogoutApiResponse {
    /// Success indicator.
    success: bool,
    /// A success message.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidCredentials | ApiError::AuthenticationFailed { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DuplicateUsername { .. }
            | ApiError::DateUnavailable { .. }
            | ApiError::EventFull { .. }
            | ApiError::AlreadySignedUp { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Returns the current UTC calendar date.
///
/// Every upcoming-event query is anchored to this value, computed fresh
/// per request rather than cached.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Handler for GET `/` endpoint.
///
/// Returns the role-specific home view, or an anonymous marker when no
/// valid session is presented.
async fn handle_home(
    AxumState(app_state): AxumState<AppState>,
    MaybeSessionUser(current): MaybeSessionUser,
) -> Result<Json<HomeApiResponse>, HttpError> {
    let Some(user) = current else {
        return Ok(Json(HomeApiResponse {
            authenticated: false,
            view: None,
        }));
    };

    info!(username = %user.username, role = ?user.role, "Handling home request");

    let mut persistence = app_state.persistence.lock().await;
    let view: HomeView = home_view(&mut persistence, &user, today())?;
    drop(persistence);

    Ok(Json(HomeApiResponse {
        authenticated: true,
        view: Some(view),
    }))
}

/// Handler for POST `/login` endpoint.
///
/// Verifies credentials and establishes a session.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginApiResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let (session_token, user, identity) =
        AuthenticationService::login(&mut persistence, &req.username, &req.password)
            .map_err(|e| HttpError::from(ApiError::from(e)))?;
    drop(persistence);

    info!(username = %user.username, "Login succeeded");

    Ok(Json(LoginApiResponse {
        session_token,
        username: user.username,
        display_name: identity.display_name,
        role: identity.role.as_str().to_owned(),
    }))
}

/// Handler for GET `/logout` endpoint.
///
/// Deletes the presented session.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutApiResponse>, HttpError> {
    let token: &str = bearer_token(&headers).map_err(|_| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing or invalid Authorization header"),
    })?;

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token)
        .map_err(|e| HttpError::from(ApiError::from(e)))?;
    drop(persistence);

    Ok(Json(LogoutApiResponse {
        success: true,
        message: String::from("You were logged out."),
    }))
}

/// Handler for POST `/register` endpoint.
///
/// Anonymous callers self-register as Customers; the authenticated Owner
/// registers Staff.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    MaybeSessionUser(current): MaybeSessionUser,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    info!(username = %req.username, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = register(&mut persistence, &req, current.as_ref())?;
    drop(persistence);

    info!(
        username = %response.username,
        role = %response.role,
        "Registration succeeded"
    );

    Ok(Json(response))
}

/// Handler for POST `/edit/{event_id}` endpoint.
///
/// Signs the authenticated staff member up for one event slot.
async fn handle_sign_up(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<SignUpResponse>, HttpError> {
    info!(
        username = %user.username,
        event_id,
        "Handling staff sign-up request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SignUpResponse = staff_sign_up(&mut persistence, event_id, &user)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/request_event` endpoint.
///
/// Creates a new event requested by the authenticated customer.
async fn handle_request_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<RequestEventRequest>,
) -> Result<Json<RequestEventResponse>, HttpError> {
    info!(
        username = %user.username,
        date = %req.date,
        "Handling request_event request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RequestEventResponse = request_event(&mut persistence, &req, &user)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cancel/{event_id}` endpoint.
///
/// Cancels an event requested by the authenticated customer.
async fn handle_cancel(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<CancelEventResponse>, HttpError> {
    info!(
        username = %user.username,
        event_id,
        "Handling cancel request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelEventResponse = cancel_event(&mut persistence, event_id, &user)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route("/login", post(handle_login))
        .route("/register", post(handle_register))
        .route("/logout", get(handle_logout))
        .route("/edit/{event_id}", post(handle_sign_up))
        .route("/request_event", post(handle_request_event))
        .route("/cancel/{event_id}", post(handle_cancel))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Caterbook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Bootstrap: provision the Owner account on first initialization
    if let Some(owner_id) = persistence.ensure_owner_account()? {
        info!(owner_id, "Provisioned Owner account");
    }

    // Drop any sessions that expired while the server was down
    persistence.delete_expired_sessions()?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence and a
    /// bootstrapped Owner.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence
            .ensure_owner_account()
            .expect("Failed to bootstrap owner");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    async fn post_json(
        app: &Router,
        uri: &str,
        token: Option<&str>,
        body: &impl Serialize,
    ) -> axum::response::Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        app.clone()
            .oneshot(
                builder
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_with_token(
        app: &Router,
        uri: &str,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_of<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let response = post_json(
            app,
            "/login",
            None,
            &LoginApiRequest {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let login_response: LoginApiResponse = body_of(response).await;
        login_response.session_token
    }

    fn register_body(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            display_name: format!("Test {username}"),
            password: String::from("pass"),
            password_confirmation: String::from("pass"),
        }
    }

    #[tokio::test]
    async fn test_home_without_session_is_anonymous() {
        let app: Router = build_router(create_test_app_state());

        let response = get_with_token(&app, "/", None).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let home: HomeApiResponse = body_of(response).await;
        assert!(!home.authenticated);
        assert!(home.view.is_none());
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let app: Router = build_router(create_test_app_state());

        let unknown = post_json(
            &app,
            "/login",
            None,
            &LoginApiRequest {
                username: String::from("nobody"),
                password: String::from("pass"),
            },
        )
        .await;
        let wrong = post_json(
            &app,
            "/login",
            None,
            &LoginApiRequest {
                username: String::from("owner"),
                password: String::from("wrong"),
            },
        )
        .await;

        assert_eq!(unknown.status(), HttpStatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), HttpStatusCode::UNAUTHORIZED);

        let unknown_body: ErrorResponse = body_of(unknown).await;
        let wrong_body: ErrorResponse = body_of(wrong).await;
        assert_eq!(unknown_body.message, wrong_body.message);
    }

    #[tokio::test]
    async fn test_owner_registers_staff_and_anonymous_registers_customer() {
        let app: Router = build_router(create_test_app_state());
        let owner_token: String = login(&app, "owner", "pass").await;

        let staff_response = post_json(
            &app,
            "/register",
            Some(owner_token.as_str()),
            &register_body("s1"),
        )
        .await;
        assert_eq!(staff_response.status(), HttpStatusCode::OK);
        let staff: RegisterResponse = body_of(staff_response).await;
        assert_eq!(staff.role, "Staff");

        let customer_response = post_json(&app, "/register", None, &register_body("c1")).await;
        assert_eq!(customer_response.status(), HttpStatusCode::OK);
        let customer: RegisterResponse = body_of(customer_response).await;
        assert_eq!(customer.role, "Customer");
    }

    #[tokio::test]
    async fn test_authenticated_customer_cannot_register_accounts() {
        let app: Router = build_router(create_test_app_state());

        post_json(&app, "/register", None, &register_body("c1")).await;
        let customer_token: String = login(&app, "c1", "pass").await;

        let response = post_json(
            &app,
            "/register",
            Some(customer_token.as_str()),
            &register_body("c2"),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_duplicate_date_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());

        post_json(&app, "/register", None, &register_body("c1")).await;
        let token: String = login(&app, "c1", "pass").await;

        let first = post_json(
            &app,
            "/request_event",
            Some(token.as_str()),
            &RequestEventRequest {
                name: String::from("Wedding"),
                date: String::from("2999-06-01"),
            },
        )
        .await;
        assert_eq!(first.status(), HttpStatusCode::OK);

        let second = post_json(
            &app,
            "/request_event",
            Some(token.as_str()),
            &RequestEventRequest {
                name: String::from("Graduation"),
                date: String::from("2999-06-01"),
            },
        )
        .await;
        assert_eq!(second.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_customer_cannot_claim_event_slots() {
        let app: Router = build_router(create_test_app_state());

        post_json(&app, "/register", None, &register_body("c1")).await;
        let token: String = login(&app, "c1", "pass").await;

        let created = post_json(
            &app,
            "/request_event",
            Some(token.as_str()),
            &RequestEventRequest {
                name: String::from("Wedding"),
                date: String::from("2999-06-01"),
            },
        )
        .await;
        let event: RequestEventResponse = body_of(created).await;

        let response = post_json(
            &app,
            &format!("/edit/{}", event.event_id),
            Some(token.as_str()),
            &serde_json::json!({}),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_session() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "owner", "pass").await;

        let logout_response = get_with_token(&app, "/logout", Some(token.as_str())).await;
        assert_eq!(logout_response.status(), HttpStatusCode::OK);

        // The home route treats the stale token as anonymous.
        let home_response = get_with_token(&app, "/", Some(token.as_str())).await;
        let home: HomeApiResponse = body_of(home_response).await;
        assert!(!home.authenticated);
    }

    #[tokio::test]
    #[allow(clippy::too_many_lines)]
    async fn test_complete_booking_workflow() {
        let app: Router = build_router(create_test_app_state());

        // Owner logs in and registers staff s1.
        let owner_token: String = login(&app, "owner", "pass").await;
        post_json(&app, "/register", Some(owner_token.as_str()), &register_body("s1")).await;

        // Customer c1 self-registers and requests a wedding.
        post_json(&app, "/register", None, &register_body("c1")).await;
        let c1_token: String = login(&app, "c1", "pass").await;

        let created = post_json(
            &app,
            "/request_event",
            Some(c1_token.as_str()),
            &RequestEventRequest {
                name: String::from("Wedding"),
                date: String::from("2999-06-01"),
            },
        )
        .await;
        assert_eq!(created.status(), HttpStatusCode::OK);
        let event: RequestEventResponse = body_of(created).await;

        // The owner sees the event, and it is understaffed.
        let owner_home: HomeApiResponse =
            body_of(get_with_token(&app, "/", Some(owner_token.as_str())).await).await;
        let Some(HomeView::Owner {
            events,
            understaffed,
        }) = owner_home.view
        else {
            panic!("Owner must receive the owner view");
        };
        assert_eq!(events.len(), 1);
        assert_eq!(understaffed.len(), 1);

        // s1 sees it as available, claims it, and it becomes "mine".
        let s1_token: String = login(&app, "s1", "pass").await;

        let s1_home: HomeApiResponse =
            body_of(get_with_token(&app, "/", Some(s1_token.as_str())).await).await;
        let Some(HomeView::Staff {
            my_events,
            available_events,
        }) = s1_home.view
        else {
            panic!("Staff must receive the staff view");
        };
        assert!(my_events.is_empty());
        assert_eq!(available_events.len(), 1);

        let sign_up = post_json(
            &app,
            &format!("/edit/{}", event.event_id),
            Some(s1_token.as_str()),
            &serde_json::json!({}),
        )
        .await;
        assert_eq!(sign_up.status(), HttpStatusCode::OK);
        let claimed: SignUpResponse = body_of(sign_up).await;
        assert_eq!(claimed.slot, "staff1");

        let s1_home: HomeApiResponse =
            body_of(get_with_token(&app, "/", Some(s1_token.as_str())).await).await;
        let Some(HomeView::Staff {
            my_events,
            available_events,
        }) = s1_home.view
        else {
            panic!("Staff must receive the staff view");
        };
        assert_eq!(my_events.len(), 1);
        assert!(available_events.is_empty());

        // c1 cancels; the event disappears from every view.
        let cancel = post_json(
            &app,
            &format!("/cancel/{}", event.event_id),
            Some(c1_token.as_str()),
            &serde_json::json!({}),
        )
        .await;
        assert_eq!(cancel.status(), HttpStatusCode::OK);

        let owner_home: HomeApiResponse =
            body_of(get_with_token(&app, "/", Some(owner_token.as_str())).await).await;
        let Some(HomeView::Owner { events, .. }) = owner_home.view else {
            panic!("Owner must receive the owner view");
        };
        assert!(events.is_empty());

        let c1_home: HomeApiResponse =
            body_of(get_with_token(&app, "/", Some(c1_token.as_str())).await).await;
        let Some(HomeView::Customer { requested_events }) = c1_home.view else {
            panic!("Customer must receive the customer view");
        };
        assert!(requested_events.is_empty());
    }
}
