//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use authn_auth::credential::{CredentialStore, LocalCredentialStore};
use authn_auth::session::{SessionManager, SessionStore};
use authn_core::config::AppConfig;
use authn_core::result::AppResult;
use authn_core::traits::{Clock, LoginAttemptHook};
use authn_database::repositories::{SessionRepository, UserRepository};

use crate::cookie::SessionCookie;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session lifecycle engine.
    pub session_manager: Arc<SessionManager>,
    /// Local user accounts, used by the dev seeding endpoint.
    pub credentials: Arc<LocalCredentialStore>,
    /// Session cookie policy.
    pub session_cookie: Arc<SessionCookie>,
}

impl AppState {
    /// Wires repositories, the credential store and the engine together.
    pub fn new(
        config: AppConfig,
        db_pool: SqlitePool,
        clock: Arc<dyn Clock>,
        login_hook: Arc<dyn LoginAttemptHook>,
    ) -> AppResult<Self> {
        let credentials = Arc::new(LocalCredentialStore::new(
            UserRepository::new(db_pool.clone()),
            Arc::clone(&clock),
        )?);

        let session_store = SessionStore::new(
            SessionRepository::new(db_pool),
            &config.session,
            Arc::clone(&clock),
        );

        let session_manager = Arc::new(SessionManager::new(
            session_store,
            Arc::clone(&credentials) as Arc<dyn CredentialStore>,
            login_hook,
            clock,
        ));

        let session_cookie = Arc::new(SessionCookie::new(
            &config.cookie,
            config.session.absolute_ttl(),
        ));

        Ok(Self {
            config: Arc::new(config),
            session_manager,
            credentials,
            session_cookie,
        })
    }
}
