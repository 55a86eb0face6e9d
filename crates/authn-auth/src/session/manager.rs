//! Session lifecycle engine: login, per-request validation, logout.
//!
//! A session is `Active` until it is revoked or reaches either expiry.
//! Both end states are terminal. Expiry is decided lazily at access time
//! against the injected [`Clock`]; nothing sweeps the table in the
//! background.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use authn_core::error::AppError;
use authn_core::result::AppResult;
use authn_core::traits::{Clock, LoginAttemptHook};
use authn_entity::session::{RevokeScope, Session, SessionState};
use authn_entity::user::UserPublic;

use super::store::SessionStore;
use crate::credential::CredentialStore;
use crate::csrf;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// New session identifier, to be set as the session cookie.
    pub session_id: String,
    /// CSRF token bound to the new session.
    pub csrf_token: String,
    pub expires_at: i64,
    pub absolute_expires_at: i64,
    /// The authenticated user's public profile.
    pub user: UserPublic,
}

/// A session that passed validation and was renewed.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    /// The session with its renewed `last_seen` and `expires_at`.
    pub session: Session,
    /// The owning user's public profile.
    pub user: UserPublic,
}

/// Orchestrates credential checks and the session store.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Session persistence.
    store: SessionStore,
    /// User lookup and password verification.
    credentials: Arc<dyn CredentialStore>,
    /// Observer of login attempts.
    login_hook: Arc<dyn LoginAttemptHook>,
    /// Time source for expiry decisions.
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        store: SessionStore,
        credentials: Arc<dyn CredentialStore>,
        login_hook: Arc<dyn LoginAttemptHook>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            credentials,
            login_hook,
            clock,
        }
    }

    /// The underlying session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Verifies credentials and opens a new session.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `InvalidCredentials`. Every successful login creates a new session;
    /// existing sessions of the user are untouched.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> AppResult<LoginResult> {
        let user = match self.credentials.lookup(username).await? {
            Some(user) => user,
            None => {
                self.credentials.verify_unknown(password).await;
                return Err(self.reject_login(username, client_ip).await);
            }
        };

        if !self.credentials.verify(&user, password).await? {
            return Err(self.reject_login(username, client_ip).await);
        }

        let session = self.store.create(user.id, client_ip, user_agent).await?;
        self.login_hook.on_success(user.id).await;

        info!(
            user_id = user.id,
            session = %session.log_id(),
            ip = client_ip.unwrap_or("-"),
            "Login succeeded"
        );

        Ok(LoginResult {
            session_id: session.session_id,
            csrf_token: session.csrf_token,
            expires_at: session.expires_at,
            absolute_expires_at: session.absolute_expires_at,
            user: user.public_view(),
        })
    }

    /// Validates a presented session identifier and slides its idle window.
    ///
    /// Fails with `NoSession` when nothing was presented, `InvalidSession`
    /// when the row is missing or revoked (including a revoke that lands
    /// between the fetch and the renewal), and `SessionExpired` when either
    /// expiry has passed. If the owning user has disappeared the session is
    /// revoked and the call fails with `UserNotFound`.
    pub async fn validate_and_touch(&self, session_id: Option<&str>) -> AppResult<ValidatedSession> {
        let session_id = present(session_id).ok_or_else(AppError::no_session)?;
        let mut session = self
            .store
            .get(session_id)
            .await?
            .ok_or_else(AppError::invalid_session)?;

        let now = self.clock.now();
        match session.state_at(now) {
            SessionState::Revoked => return Err(AppError::invalid_session()),
            SessionState::Expired => return Err(AppError::session_expired()),
            SessionState::Active => {}
        }

        // The row was active at `now`, so a refused touch means a revoke
        // committed after the fetch.
        if !self.store.touch(session_id, now).await? {
            return Err(AppError::invalid_session());
        }
        session.last_seen = now;
        session.expires_at = now
            .saturating_add(self.store.idle_ttl())
            .min(session.absolute_expires_at);

        let Some(user) = self.credentials.lookup_by_id(session.user_id).await? else {
            self.store.revoke(session_id, RevokeScope::Single).await?;
            warn!(
                user_id = session.user_id,
                session = %session.log_id(),
                "Session owner no longer exists; session revoked"
            );
            return Err(AppError::user_not_found());
        };

        Ok(ValidatedSession {
            session,
            user: user.public_view(),
        })
    }

    /// Revokes the presented session, or all of its owner's sessions.
    ///
    /// The `csrf_header` must exactly equal the session's CSRF token; on
    /// mismatch nothing is revoked. Logout does not require the session to
    /// be unexpired. Returns the scope that was applied.
    pub async fn logout(
        &self,
        session_id: Option<&str>,
        csrf_header: Option<&str>,
        all_devices: bool,
    ) -> AppResult<RevokeScope> {
        let session_id = present(session_id).ok_or_else(AppError::no_session)?;
        let session = self
            .store
            .get(session_id)
            .await?
            .filter(|s| !s.revoked)
            .ok_or_else(AppError::invalid_session)?;

        if !csrf::token_matches(&session.csrf_token, csrf_header) {
            warn!(session = %session.log_id(), "Logout rejected: CSRF token mismatch");
            return Err(AppError::csrf_invalid());
        }

        let scope = RevokeScope::for_logout(all_devices);
        let revoked = self.store.revoke(session_id, scope).await?;

        info!(
            user_id = session.user_id,
            session = %session.log_id(),
            %scope,
            revoked,
            "Logout"
        );
        Ok(scope)
    }

    async fn reject_login(&self, username: &str, client_ip: Option<&str>) -> AppError {
        self.login_hook.on_failure(username, client_ip).await;
        warn!(ip = client_ip.unwrap_or("-"), "Login failed: invalid credentials");
        AppError::invalid_credentials()
    }
}

/// Treats an empty identifier the same as a missing one.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
