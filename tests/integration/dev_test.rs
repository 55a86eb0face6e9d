//! Integration tests for the dev seeding endpoint, liveness and CORS.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use authn_core::config::AppConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::new().await;

    let response = app.get("/healthz", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
}

#[tokio::test]
async fn test_create_user_then_login() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/dev/create-user",
            Some(serde_json::json!({
                "username": "carol",
                "password": "s3cret",
                "email": "carol@example.com",
                "given_name": "Carol",
            })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], "carol");
    assert_eq!(response.body["user"]["given_name"], "Carol");
    assert!(response.body["user"].get("password_hash").is_none());

    let session = app.login("carol", "s3cret").await;
    let me = app.get("/session/me", Some(&session.session_id)).await;
    assert_eq!(me.body["user"]["email"], "carol@example.com");
}

#[tokio::test]
async fn test_create_user_disabled() {
    let mut config = AppConfig::default();
    config.dev.enabled = false;
    let app = TestApp::with_config(config).await;

    let response = app
        .post(
            "/dev/create-user",
            Some(serde_json::json!({"username": "carol", "password": "s3cret"})),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.detail(), "dev endpoint disabled");

    let mut config = AppConfig::default();
    config.dev.local_users = false;
    let app = TestApp::with_config(config).await;
    let response = app
        .post(
            "/dev/create-user",
            Some(serde_json::json!({"username": "carol", "password": "s3cret"})),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_user_missing_credentials() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/dev/create-user",
            Some(serde_json::json!({"username": "carol", "password": ""})),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.detail(), "username/password required");
}

#[tokio::test]
async fn test_create_user_duplicate() {
    let app = TestApp::new().await;
    app.create_user("carol", "s3cret").await;

    let response = app
        .post(
            "/dev/create-user",
            Some(serde_json::json!({"username": "carol", "password": "other"})),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.detail(), "Username 'carol' already exists");
}

#[tokio::test]
async fn test_cors_preflight_allows_credentials() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Request::builder()
                .method("OPTIONS")
                .uri("/logout")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-csrf,content-type"),
            Body::empty(),
            None,
            None,
        )
        .await;

    assert!(response.status.is_success());
    let headers = &response.headers;
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .contains("x-csrf")
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Request::builder()
                .method("OPTIONS")
                .uri("/logout")
                .header(header::ORIGIN, "http://evil.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST"),
            Body::empty(),
            None,
            None,
        )
        .await;

    assert!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
