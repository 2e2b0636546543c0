use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum SiteError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not found")]
    NotFound,

    #[error("not found")]
    NotFoundRoute,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SiteError::Unauthorized | SiteError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SiteError::NotFound | SiteError::NotFoundRoute => StatusCode::NOT_FOUND,
            SiteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SiteError::Database(_)
            | SiteError::Json(_)
            | SiteError::PasswordHash(_)
            | SiteError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<argon2::password_hash::Error> for SiteError {
    fn from(e: argon2::password_hash::Error) -> Self {
        SiteError::PasswordHash(e.to_string())
    }
}

/// Error payload returned by every endpoint: `{"error": "<message>"}`.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for SiteError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "internal error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}
