use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::SiteError;

/// Lenient JSON body: an empty body or a literal `null` yields `T::default()`.
///
/// The `Content-Type` header is not checked.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = SiteError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let body = serde_json::from_slice::<Option<T>>(&bytes)
            .map_err(|e| invalid_body(e.to_string()))?;
        Ok(JsonBody(body.unwrap_or_default()))
    }
}

fn invalid_body(reason: String) -> SiteError {
    SiteError::InvalidInput(format!("invalid request body: {reason}"))
}

/// Numeric `{id}` path segment. Anything else is treated as an unmatched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = SiteError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| SiteError::NotFoundRoute)?;
        Ok(Self(id))
    }
}
