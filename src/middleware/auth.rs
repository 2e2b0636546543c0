use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SiteError;

pub const SESSION_COOKIE: &str = "site_session";

/// Contents of the encrypted session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub user_id: i64,
    pub email: String,
    /// Unix seconds after which the session is ignored.
    pub expires_at: i64,
}

impl SessionData {
    pub fn new(user_id: i64, email: String, ttl: time::Duration) -> Self {
        Self {
            user_id,
            email,
            expires_at: Utc::now().timestamp() + ttl.whole_seconds(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }
}

/// Session state of the current request, resolved once from the cookie jar.
///
/// Missing, undecryptable, malformed and expired cookies all resolve to "no session".
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    session: Option<SessionData>,
}

impl SessionContext {
    pub fn from_jar(jar: &PrivateCookieJar) -> Self {
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|c| serde_json::from_str::<SessionData>(c.value()).ok())
            .filter(|s| !s.is_expired());
        Self { session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.email.as_str())
    }

    pub fn session(&self) -> Option<&SessionData> {
        self.session.as_ref()
    }

    pub fn into_session(self) -> Option<SessionData> {
        self.session
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<SessionContext>() {
            return Ok(ctx.clone());
        }
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        let ctx = SessionContext::from_jar(&jar);
        parts.extensions.insert(ctx.clone());
        Ok(ctx)
    }
}

/// Auth gate for admin endpoints: rejects with 401 unless a session is active.
///
/// Extracted before the body, so a rejected request never reaches the store.
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionData);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = SiteError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(ctx) = SessionContext::from_request_parts(parts, state).await;
        match ctx.into_session() {
            Some(session) => Ok(Self(session)),
            None => {
                debug!(path = %parts.uri.path(), "rejecting request without session");
                Err(SiteError::Unauthorized)
            }
        }
    }
}

pub fn session_cookie(
    session: &SessionData,
    ttl: time::Duration,
    secure: bool,
) -> Result<Cookie<'static>, SiteError> {
    let value = serde_json::to_string(session)?;
    Ok(Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(ttl)
        .build())
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar_with(value: Option<String>) -> (Key, PrivateCookieJar) {
        let key = Key::generate();
        let jar = PrivateCookieJar::new(key.clone());
        let jar = match value {
            Some(v) => jar.add(Cookie::new(SESSION_COOKIE, v)),
            None => jar,
        };
        (key, jar)
    }

    #[test]
    fn live_session_is_authenticated() {
        let data = SessionData::new(7, "owner@example.com".into(), time::Duration::hours(1));
        let (_key, jar) = jar_with(Some(serde_json::to_string(&data).unwrap()));
        let ctx = SessionContext::from_jar(&jar);
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.email(), Some("owner@example.com"));
        assert_eq!(ctx.session().map(|s| s.user_id), Some(7));
    }

    #[test]
    fn expired_or_garbled_sessions_are_ignored() {
        let expired = SessionData {
            user_id: 1,
            email: "a@b.co".into(),
            expires_at: Utc::now().timestamp() - 1,
        };
        let (_key, jar) = jar_with(Some(serde_json::to_string(&expired).unwrap()));
        assert!(!SessionContext::from_jar(&jar).is_authenticated());

        let (_key, jar) = jar_with(Some("not json".into()));
        assert!(!SessionContext::from_jar(&jar).is_authenticated());

        let (_key, jar) = jar_with(None);
        assert!(!SessionContext::from_jar(&jar).is_authenticated());
    }

    #[test]
    fn session_cookie_attributes() {
        let data = SessionData::new(1, "a@b.co".into(), time::Duration::hours(2));
        let cookie = session_cookie(&data, time::Duration::hours(2), true).unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(2)));
    }
}
