mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, login, send, spawn_app};

#[tokio::test]
async fn login_me_logout_round_trip() {
    let t = spawn_app().await;

    let me = send(&t.app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(me.body, json!({"authenticated": false}));

    let resp = send(
        &t.app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({"ok": true, "email": ADMIN_EMAIL}));
    let cookie = resp.session_cookie().expect("session cookie");

    let me = send(&t.app, "GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.body, json!({"authenticated": true, "email": ADMIN_EMAIL}));

    let out = send(&t.app, "POST", "/api/auth/logout", None, Some(&cookie)).await;
    assert_eq!(out.status, StatusCode::OK);
    assert_eq!(out.body, json!({"ok": true}));
    let cleared = out.session_cookie().expect("logout should overwrite the cookie");

    let me = send(&t.app, "GET", "/api/auth/me", None, Some(&cleared)).await;
    assert_eq!(me.body, json!({"authenticated": false}));
}

#[tokio::test]
async fn login_normalizes_email_case_and_whitespace() {
    let t = spawn_app().await;
    let resp = send(
        &t.app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "  OWNER@Example.com ", "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn login_without_credentials_is_bad_request() {
    let t = spawn_app().await;

    for body in [
        Some(json!({})),
        Some(json!({"email": ADMIN_EMAIL})),
        Some(json!({"email": "   ", "password": ADMIN_PASSWORD})),
        None,
    ] {
        let resp = send(&t.app, "POST", "/api/auth/login", body, None).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body, json!({"error": "missing credentials"}));
        assert!(resp.session_cookie().is_none());
    }
}

#[tokio::test]
async fn login_with_wrong_credentials_is_unauthorized() {
    let t = spawn_app().await;

    for (email, password) in [(ADMIN_EMAIL, "wrong"), ("nobody@example.com", ADMIN_PASSWORD)] {
        let resp = send(
            &t.app,
            "POST",
            "/api/auth/login",
            Some(json!({"email": email, "password": password})),
            None,
        )
        .await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp.body, json!({"error": "invalid credentials"}));
        assert!(resp.session_cookie().is_none());
    }
}

#[tokio::test]
async fn logout_without_session_is_idempotent() {
    let t = spawn_app().await;
    for _ in 0..2 {
        let resp = send(&t.app, "POST", "/api/auth/logout", None, None).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, json!({"ok": true}));
    }
}

#[tokio::test]
async fn tampered_session_cookie_is_rejected() {
    let t = spawn_app().await;
    let cookie = login(&t.app).await;

    let mut tampered = cookie.clone();
    tampered.pop();
    tampered.push(if cookie.ends_with('A') { 'B' } else { 'A' });

    let me = send(&t.app, "GET", "/api/auth/me", None, Some(&tampered)).await;
    assert_eq!(me.body, json!({"authenticated": false}));

    let forged = send(
        &t.app,
        "GET",
        "/api/auth/me",
        None,
        Some(r#"site_session={"user_id":1,"email":"x@y.z","expires_at":99999999999}"#),
    )
    .await;
    assert_eq!(forged.body, json!({"authenticated": false}));
}

#[tokio::test]
async fn session_from_another_key_is_rejected() {
    let first = spawn_app().await;
    let second = spawn_app().await;
    let cookie = login(&first.app).await;

    let resp = send(
        &second.app,
        "POST",
        "/api/testimonials",
        Some(json!({"quote": "q"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
