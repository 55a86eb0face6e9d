//! Integration tests for login.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::StatusCode;

use authn_core::config::{AppConfig, SameSitePolicy};
use authn_core::traits::LoginAttemptHook;

use crate::helpers::{DAY, START, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let alice_id = app.create_user("alice", "correct").await;

    let response = app
        .post(
            "/login",
            Some(serde_json::json!({"username": "alice", "password": "correct"})),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], alice_id);
    assert_eq!(response.body["user"]["username"], "alice");
    assert!(response.body["user"].get("password_hash").is_none());

    let csrf = response.body["csrf_token"].as_str().unwrap();
    assert!(csrf.len() >= 32);
    assert!(
        csrf.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );

    let cookie = response.set_cookie().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains(&format!("Max-Age={}", 30 * DAY)));
    assert!(!cookie.contains("Secure"));

    let session_id = response.session_cookie().unwrap();
    assert_ne!(session_id, csrf);
    assert!(response.body.get("session_id").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_match() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;

    let wrong = app
        .post(
            "/login",
            Some(serde_json::json!({"username": "alice", "password": "nope"})),
            None,
            None,
        )
        .await;
    let unknown = app
        .post(
            "/login",
            Some(serde_json::json!({"username": "nobody", "password": "correct"})),
            None,
            None,
        )
        .await;

    for response in [&wrong, &unknown] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.detail(), "invalid_credentials");
        assert!(response.set_cookie().is_none());
    }
    assert_eq!(wrong.body, unknown.body);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::new().await;

    let response = app.post_raw("/login", "{not json", None, None).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.detail(), "invalid_body");

    let response = app
        .post(
            "/login",
            Some(serde_json::json!({"username": "alice"})),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

fn login_from_peer(forwarded_for: &str) -> axum::http::request::Builder {
    axum::http::Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", forwarded_for)
        .header("user-agent", "integration-test")
        .extension(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 40_000))))
}

#[tokio::test]
async fn test_login_records_peer_address() {
    let app = TestApp::new().await;
    app.create_user("alice", "correct").await;

    let response = app
        .request(
            login_from_peer("203.0.113.7"),
            Body::from(r#"{"username":"alice","password":"correct"}"#),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let session_id = response.session_cookie().unwrap();
    let stored = app
        .state
        .session_manager
        .store()
        .get(&session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ip.as_deref(), Some("192.0.2.10"));
    assert_eq!(stored.user_agent.as_deref(), Some("integration-test"));
    assert_eq!(stored.created_at, START);
}

#[tokio::test]
async fn test_login_uses_forwarded_for_behind_trusted_proxy() {
    let mut config = AppConfig::default();
    config.server.trust_forwarded_for = true;
    let app = TestApp::with_config(config).await;
    app.create_user("alice", "correct").await;

    let response = app
        .request(
            login_from_peer("203.0.113.7, 10.0.0.1"),
            Body::from(r#"{"username":"alice","password":"correct"}"#),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let session_id = response.session_cookie().unwrap();
    let stored = app
        .state
        .session_manager
        .store()
        .get(&session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ip.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_cookie_flags_follow_config() {
    let mut config = AppConfig::default();
    config.cookie.name = "sid".to_string();
    config.cookie.secure = true;
    config.cookie.same_site = SameSitePolicy::Strict;
    config.session.absolute_ttl_seconds = 3_600;
    config.session.idle_ttl_seconds = 600;

    let app = TestApp::with_config(config).await;
    app.create_user("alice", "correct").await;
    let session = app.login("alice", "correct").await;

    let me = app.get("/session/me", Some(&session.session_id)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["absolute_expires_at"], START + 3_600);
    assert_eq!(me.body["expires_at"], START + 600);

    let response = app
        .post(
            "/login",
            Some(serde_json::json!({"username": "alice", "password": "correct"})),
            None,
            None,
        )
        .await;
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("sid="));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=3600"));
}

#[derive(Debug, Default)]
struct RecordingHook {
    failures: AtomicUsize,
    failure_ips: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl LoginAttemptHook for RecordingHook {
    async fn on_failure(&self, _username: &str, client_ip: Option<&str>) {
        self.failures.fetch_add(1, Ordering::SeqCst);
        self.failure_ips
            .lock()
            .unwrap()
            .push(client_ip.map(String::from));
    }
}

#[tokio::test]
async fn test_failed_logins_reach_hook() {
    let hook = Arc::new(RecordingHook::default());
    let app = TestApp::with_hook(hook.clone()).await;
    app.create_user("alice", "correct").await;

    for password in ["a", "b", "c"] {
        let response = app
            .post(
                "/login",
                Some(serde_json::json!({"username": "alice", "password": password})),
                None,
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // No lockout policy: the right password still works.
    app.login("alice", "correct").await;
    assert_eq!(hook.failures.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_hook_sees_peer_address_not_forwarded_header() {
    let hook = Arc::new(RecordingHook::default());
    let app = TestApp::with_hook(hook.clone()).await;
    app.create_user("alice", "correct").await;

    for i in 0..3 {
        let response = app
            .request(
                login_from_peer(&format!("198.51.100.{i}")),
                Body::from(r#"{"username":"alice","password":"wrong"}"#),
                None,
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let ips = hook.failure_ips.lock().unwrap().clone();
    assert_eq!(ips, vec![Some("192.0.2.10".to_string()); 3]);
}
