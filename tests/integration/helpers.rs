//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use authn_api::AppState;
use authn_api::router::build_router;
use authn_auth::credential::NewAccount;
use authn_core::config::{AppConfig, DatabaseConfig};
use authn_core::traits::{LoginAttemptHook, ManualClock, NoopLoginHook};
use authn_database::DatabasePool;
use authn_database::migration::run_migrations;

/// Fixed start time for every test clock.
pub const START: i64 = 1_700_000_000;
pub const HOUR: i64 = 3_600;
pub const DAY: i64 = 86_400;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct store access
    pub state: AppState,
    /// Test clock driving every expiry decision
    pub clock: Arc<ManualClock>,
}

/// Client-side view of a logged-in session.
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub session_id: String,
    pub csrf_token: String,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with the given configuration
    pub async fn with_config(config: AppConfig) -> Self {
        Self::build(config, Arc::new(NoopLoginHook)).await
    }

    /// Create a test application with a custom login hook
    pub async fn with_hook(hook: Arc<dyn LoginAttemptHook>) -> Self {
        Self::build(AppConfig::default(), hook).await
    }

    async fn build(mut config: AppConfig, hook: Arc<dyn LoginAttemptHook>) -> Self {
        config.database = DatabaseConfig::in_memory();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let clock = Arc::new(ManualClock::new(START));
        let state = AppState::new(config, db.into_pool(), clock.clone(), hook)
            .expect("Failed to build state");
        let router = build_router(state.clone());

        Self {
            router,
            state,
            clock,
        }
    }

    /// Create a local user and return their id
    pub async fn create_user(&self, username: &str, password: &str) -> i64 {
        self.state
            .credentials
            .register(NewAccount {
                username: username.to_string(),
                password: password.to_string(),
                email: Some(format!("{username}@example.com")),
                given_name: Some(username.to_string()),
                ..NewAccount::default()
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Log in and return the cookie value and CSRF token
    pub async fn login(&self, username: &str, password: &str) -> LoggedIn {
        let response = self
            .post(
                "/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        LoggedIn {
            session_id: response
                .session_cookie()
                .expect("No session cookie in login response"),
            csrf_token: response.body["csrf_token"]
                .as_str()
                .expect("No csrf_token in login response")
                .to_string(),
        }
    }

    /// GET with an optional session cookie
    pub async fn get(&self, path: &str, session_id: Option<&str>) -> TestResponse {
        self.request(
            Request::builder().method("GET").uri(path),
            Body::empty(),
            session_id,
            None,
        )
        .await
    }

    /// POST a JSON body with an optional session cookie and CSRF header
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        session_id: Option<&str>,
        csrf: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.post_raw(path, body, session_id, csrf).await
    }

    /// POST a raw body
    pub async fn post_raw(
        &self,
        path: &str,
        body: impl Into<Body>,
        session_id: Option<&str>,
        csrf: Option<&str>,
    ) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json"),
            body.into(),
            session_id,
            csrf,
        )
        .await
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        mut builder: axum::http::request::Builder,
        body: Body,
        session_id: Option<&str>,
        csrf: Option<&str>,
    ) -> TestResponse {
        if let Some(session_id) = session_id {
            let name = &self.state.config.cookie.name;
            builder = builder.header(header::COOKIE, format!("{name}={session_id}"));
        }
        if let Some(csrf) = csrf {
            builder = builder.header("X-CSRF", csrf);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            cookie_name: self.state.config.cookie.name.clone(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
    cookie_name: String,
}

impl TestResponse {
    /// The `detail` field of an error body
    pub fn detail(&self) -> &str {
        self.body["detail"].as_str().unwrap_or_default()
    }

    /// The raw `Set-Cookie` header for the session cookie
    pub fn set_cookie(&self) -> Option<String> {
        let prefix = format!("{}=", self.cookie_name);
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(String::from)
    }

    /// The session id being set, if the response sets a non-empty one
    pub fn session_cookie(&self) -> Option<String> {
        let raw = self.set_cookie()?;
        let pair = raw.split(';').next()?;
        let value = pair.split_once('=')?.1;
        (!value.is_empty()).then(|| value.to_string())
    }
}
