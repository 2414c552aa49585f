//! Mock account endpoints.
//!
//! Any well-formed credentials are accepted; a successful flow opens a
//! server-side session and hands its token back as the `session` cookie.

use crate::error::{ServerError, ServerResult};
use crate::middleware::{clear_session_cookie, session_cookie, session_token};
use crate::state::ServerState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect};
use lostfound::{SignInRequest, SignUpRequest, User, google_user, sign_in, sign_up};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the Google flow lands once the session exists
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Body returned by sign-in and sign-up
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub message: String,
}

/// Query string of the Google entry point
#[derive(Debug, Deserialize)]
pub struct GoogleParams {
    /// "signin" or "signup"; both end in the same session
    #[serde(default)]
    pub mode: Option<String>,
}

fn open_session(state: &ServerState, user: &User) -> String {
    let token = state.open_session(user.clone());
    session_cookie(&token, state.config.secure_cookies)
}

/// POST /api/auth/signin
pub async fn sign_in_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SignInRequest>,
) -> ServerResult<impl IntoResponse> {
    let user = sign_in(&request, state.issuer.as_ref())?;
    let cookie = open_session(&state, &user);

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            user,
            message: "Signed in successfully".to_string(),
        }),
    ))
}

/// POST /api/auth/signup
pub async fn sign_up_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SignUpRequest>,
) -> ServerResult<impl IntoResponse> {
    let user = sign_up(&request, state.issuer.as_ref())?;
    let cookie = open_session(&state, &user);

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            user,
            message: "Account created successfully".to_string(),
        }),
    ))
}

/// GET /api/auth/google
pub async fn google_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<GoogleParams>,
) -> impl IntoResponse {
    let user = google_user(state.issuer.as_ref());
    tracing::info!(
        user_id = %user.id,
        mode = params.mode.as_deref().unwrap_or("signin"),
        "google_sign_in"
    );
    let cookie = open_session(&state, &user);

    ([(SET_COOKIE, cookie)], Redirect::to(DASHBOARD_PATH))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> ServerResult<Json<User>> {
    session_token(&headers)
        .and_then(|token| state.session_user(&token))
        .map(Json)
        .ok_or_else(|| ServerError::Authentication("Not signed in".to_string()))
}

/// POST /api/auth/signout
pub async fn sign_out(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let closed = session_token(&headers)
        .map(|token| state.close_session(&token))
        .unwrap_or(false);

    (
        [(SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({
            "message": "Signed out",
            "session_closed": closed,
        })),
    )
}
