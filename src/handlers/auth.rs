use axum::{Json, extract::State};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::info;

use crate::error::SiteError;
use crate::middleware::auth::{SessionContext, SessionData, clear_session_cookie, session_cookie};
use crate::middleware::JsonBody;
use crate::router::SiteState;
use crate::service::accounts;
use crate::types::Ack;
use crate::types::auth::{LoginInput, LoginOutput, MeOutput};

/// POST /api/auth/login -> verifies credentials and sets the session cookie.
pub async fn login(
    State(state): State<SiteState>,
    jar: PrivateCookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(PrivateCookieJar, Json<LoginOutput>), SiteError> {
    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();
    let user = accounts::authenticate(&state.storage, &email, &password).await?;

    let session = SessionData::new(user.id, user.email.clone(), state.session_ttl);
    let cookie = session_cookie(&session, state.session_ttl, state.secure_cookie)?;

    info!(email = %user.email, "admin logged in");
    Ok((
        jar.add(cookie),
        Json(LoginOutput {
            ok: true,
            email: user.email,
        }),
    ))
}

/// POST /api/auth/logout -> always succeeds, even without a session.
pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<Ack>) {
    (jar.remove(clear_session_cookie()), Json(Ack::OK))
}

/// GET /api/auth/me
pub async fn me(ctx: SessionContext) -> Json<MeOutput> {
    Json(MeOutput {
        authenticated: ctx.is_authenticated(),
        email: ctx.email().map(str::to_string),
    })
}
