use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lostfound::{AuthError, CatalogError, ChatError, ItemError};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Account validation failures surface their message verbatim.
    #[error("{0}")]
    Account(#[from] AuthError),

    #[error("Invalid report: {0}")]
    Report(#[from] ItemError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_) | ServerError::Account(_) | ServerError::Report(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Chat(ChatError::ThreadNotFound(_)) | ServerError::NotFound => {
                StatusCode::NOT_FOUND
            }
            ServerError::Chat(ChatError::EmptyMessage) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Account(AuthError::MissingField(_)) => "MISSING_FIELD",
            ServerError::Account(AuthError::PasswordMismatch) => "PASSWORD_MISMATCH",
            ServerError::Account(AuthError::PasswordTooShort { .. }) => "PASSWORD_TOO_SHORT",
            ServerError::Report(_) => "INVALID_REPORT",
            ServerError::Chat(ChatError::EmptyMessage) => "EMPTY_MESSAGE",
            ServerError::Chat(ChatError::ThreadNotFound(_)) => "CHAT_NOT_FOUND",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request_failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Item(inner) => ServerError::Report(inner),
            CatalogError::NotFound(_) => ServerError::NotFound,
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
