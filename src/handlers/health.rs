use axum::Json;
use chrono::Utc;

use crate::error::SiteError;
use crate::types::Health;

pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        time: Utc::now(),
    })
}

/// Fallback for unmatched routes and missing static files.
pub async fn not_found() -> SiteError {
    SiteError::NotFoundRoute
}

/// Known path, unsupported method.
pub async fn method_not_allowed() -> SiteError {
    SiteError::MethodNotAllowed
}
