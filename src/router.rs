use std::path::Path;

use axum::{
    Router,
    extract::FromRef,
    handler::HandlerWithoutStateExt,
    routing::{MethodRouter, get, get_service, patch, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::config::Config;
use crate::db::{ContentStorage, NetworkEntry, Service, Testimonial};
use crate::handlers::{auth, content, health, leads};
use crate::types::content::{NetworkInput, ServiceInput, TestimonialInput};

#[derive(Clone)]
pub struct SiteState {
    pub storage: ContentStorage,
    pub key: Key,
    pub session_ttl: time::Duration,
    pub secure_cookie: bool,
}

impl SiteState {
    pub fn new(
        storage: ContentStorage,
        key: Key,
        session_ttl: time::Duration,
        secure_cookie: bool,
    ) -> Self {
        Self {
            storage,
            key,
            session_ttl,
            secure_cookie,
        }
    }

    pub fn from_config(storage: ContentStorage, cfg: &Config) -> Self {
        Self::new(
            storage,
            cookie_key(cfg.secret.as_deref()),
            time::Duration::hours(cfg.session_ttl_hours),
            !cfg.insecure_cookie,
        )
    }
}

impl FromRef<SiteState> for Key {
    fn from_ref(state: &SiteState) -> Self {
        state.key.clone()
    }
}

/// Cookie key derived from the configured secret (validated to be long enough),
/// or a random one when no secret is set.
pub fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::derive_from(secret.as_bytes()),
        None => {
            warn!("APP_SECRET not set; using a random cookie key, sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub fn site_router(state: SiteState, static_dir: impl AsRef<Path>) -> Router {
    // GET and HEAD only; other methods get the JSON 405 instead of ServeDir's empty one
    let static_files: MethodRouter = get_service(
        ServeDir::new(static_dir.as_ref()).not_found_service(health::not_found.into_service()),
    )
    .fallback(health::method_not_allowed);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/services",
            get(content::list::<Service>).post(content::create::<ServiceInput>),
        )
        .route(
            "/api/services/{id}",
            patch(content::update::<ServiceInput>).delete(content::delete::<Service>),
        )
        .route(
            "/api/network",
            get(content::list::<NetworkEntry>).post(content::create::<NetworkInput>),
        )
        .route(
            "/api/network/{id}",
            patch(content::update::<NetworkInput>).delete(content::delete::<NetworkEntry>),
        )
        .route(
            "/api/testimonials",
            get(content::list::<Testimonial>).post(content::create::<TestimonialInput>),
        )
        .route(
            "/api/testimonials/{id}",
            patch(content::update::<TestimonialInput>).delete(content::delete::<Testimonial>),
        )
        .route(
            "/api/leads",
            get(leads::list_leads).post(leads::create_lead),
        )
        .method_not_allowed_fallback(health::method_not_allowed)
        .fallback_service(static_files)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
