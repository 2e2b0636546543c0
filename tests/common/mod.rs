#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use axum_extra::extract::cookie::Key;
use serde_json::Value;
use tower::ServiceExt;

use sitedesk::ContentStorage;
use sitedesk::router::{SiteState, site_router};
use sitedesk::service::accounts;

pub const ADMIN_EMAIL: &str = "owner@example.com";
pub const ADMIN_PASSWORD: &str = "s3cret-pass";

pub struct TestApp {
    pub app: Router,
    pub storage: ContentStorage,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Vec<String>,
    pub body: Value,
    pub raw: Vec<u8>,
}

impl TestResponse {
    /// `name=value` pair of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookie
            .iter()
            .find(|c| c.starts_with("site_session="))
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_static(&unique_temp_path("sitedesk-no-static")).await
}

pub async fn spawn_app_with_static(static_dir: &Path) -> TestApp {
    let storage = sitedesk::db::open("sqlite::memory:")
        .await
        .expect("failed to open in-memory store");
    accounts::seed_admin(&storage, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("failed to seed admin");

    let state = SiteState::new(
        storage.clone(),
        Key::generate(),
        time::Duration::hours(1),
        false,
    );
    TestApp {
        app: site_router(state, static_dir),
        storage,
    }
}

pub fn unique_temp_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("{prefix}-{}-{nanos}", std::process::id()));
    path
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let set_cookie = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();
    let raw = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec();
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

    TestResponse {
        status,
        set_cookie,
        body,
        raw,
    }
}

/// Log in as the seeded admin and return the session cookie.
pub async fn login(app: &Router) -> String {
    let resp = send(
        app,
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK, "login failed: {:?}", resp.body);
    resp.session_cookie().expect("login did not set a session cookie")
}
