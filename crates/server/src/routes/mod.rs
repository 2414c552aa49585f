//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `auth`: Mock sign-in, sign-up, Google redirect and sessions
//! - `items`: Report submission, listing buckets, detail and likes
//! - `matching`: Pairwise score breakdown
//! - `chat`: Per-user chat threads

pub mod auth;
pub mod chat;
pub mod health;
pub mod items;
pub mod matching;

use crate::error::{ServerError, ServerResult};
use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

/// API version and base info
///
/// Root endpoint (GET /), no session required.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Lost & Found Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/auth/signin",
            "/api/auth/signup",
            "/api/auth/google",
            "/api/v1/items",
            "/api/v1/categories",
            "/api/v1/compare",
            "/api/v1/chats",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
