//! Integration tests for logout and CSRF enforcement.

use axum::http::StatusCode;

use crate::helpers::{HOUR, TestApp};

#[tokio::test]
async fn test_logout_success() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let session = app.login("alice", "correct").await;

    let response = app
        .post(
            "/logout",
            None,
            Some(&session.session_id),
            Some(&session.csrf_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);

    let cookie = response.set_cookie().unwrap();
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));
    assert!(response.session_cookie().is_none());

    let response = app.get("/session/me", Some(&session.session_id)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.detail(), "invalid_session");
}

#[tokio::test]
async fn test_logout_csrf_failures_keep_session() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let session = app.login("alice", "correct").await;

    let missing = app
        .post("/logout", None, Some(&session.session_id), None)
        .await;
    let wrong = app
        .post(
            "/logout",
            None,
            Some(&session.session_id),
            Some("not-the-token"),
        )
        .await;
    let in_query = app
        .post(
            &format!("/logout?csrf={}", session.csrf_token),
            None,
            Some(&session.session_id),
            None,
        )
        .await;
    let in_body = app
        .post(
            "/logout",
            Some(serde_json::json!({"csrf_token": session.csrf_token})),
            Some(&session.session_id),
            None,
        )
        .await;

    for response in [&missing, &wrong, &in_query, &in_body] {
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.detail(), "csrf_invalid");
        assert!(response.set_cookie().is_none());
    }

    let response = app.get("/session/me", Some(&session.session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_csrf_token_of_other_session_rejected() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let first = app.login("alice", "correct").await;
    let second = app.login("alice", "correct").await;

    let response = app
        .post(
            "/logout",
            None,
            Some(&first.session_id),
            Some(&second.csrf_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new().await;

    let response = app.post("/logout", None, None, Some("whatever")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.detail(), "no_session");

    let response = app
        .post("/logout", None, Some("unknown"), Some("whatever"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.detail(), "invalid_session");
}

#[tokio::test]
async fn test_logout_twice() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let session = app.login("alice", "correct").await;

    let first = app
        .post(
            "/logout",
            None,
            Some(&session.session_id),
            Some(&session.csrf_token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .post(
            "/logout",
            None,
            Some(&session.session_id),
            Some(&session.csrf_token),
        )
        .await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.detail(), "invalid_session");
}

#[tokio::test]
async fn test_logout_all_devices() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    app.create_user("bob", "hunter2").await;
    let laptop = app.login("alice", "correct").await;
    let phone = app.login("alice", "correct").await;
    let bob = app.login("bob", "hunter2").await;

    let response = app
        .post(
            "/logout",
            Some(serde_json::json!({"all_devices": true})),
            Some(&laptop.session_id),
            Some(&laptop.csrf_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    for session in [&laptop, &phone] {
        let response = app.get("/session/me", Some(&session.session_id)).await;
        assert_eq!(response.detail(), "invalid_session");
    }
    let response = app.get("/session/me", Some(&bob.session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_single_keeps_other_devices() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let laptop = app.login("alice", "correct").await;
    let phone = app.login("alice", "correct").await;

    let response = app
        .post(
            "/logout",
            Some(serde_json::json!({"all_devices": false})),
            Some(&laptop.session_id),
            Some(&laptop.csrf_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/session/me", Some(&phone.session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_invalid_body() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let session = app.login("alice", "correct").await;

    let response = app
        .post_raw(
            "/logout",
            "{all_devices",
            Some(&session.session_id),
            Some(&session.csrf_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.detail(), "invalid_body");

    let response = app.get("/session/me", Some(&session.session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_of_expired_session() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;
    let session = app.login("alice", "correct").await;

    app.clock.advance(9 * HOUR);
    let response = app
        .post_raw(
            "/logout",
            "  ",
            Some(&session.session_id),
            Some(&session.csrf_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = app
        .state
        .session_manager
        .store()
        .get(&session.session_id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.revoked);
}
