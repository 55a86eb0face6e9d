//! Session storage operations wrapping the database repository.

use std::sync::Arc;

use tracing::debug;

use authn_core::config::SessionConfig;
use authn_core::result::AppResult;
use authn_core::traits::Clock;
use authn_database::repositories::SessionRepository;
use authn_entity::session::{CreateSession, RevokeScope, Session};

use crate::token::TokenGenerator;

/// Durable session table: create, fetch, touch and revoke.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session database repository.
    repo: SessionRepository,
    /// Identifier and expiry policy.
    tokens: TokenGenerator,
    /// Time source for new sessions.
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: SessionRepository, config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            tokens: TokenGenerator::new(config),
            clock,
        }
    }

    /// Creates a fresh, unrevoked session for `user_id`.
    ///
    /// An identifier collision is returned as a store error and is not
    /// retried.
    pub async fn create(
        &self,
        user_id: i64,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> AppResult<Session> {
        let now = self.clock.now();
        let (expires_at, absolute_expires_at) = self.tokens.session_expiries(now);

        let session = self
            .repo
            .create(&CreateSession {
                session_id: self.tokens.new_session_id(),
                user_id,
                created_at: now,
                expires_at,
                absolute_expires_at,
                ip: ip.map(String::from),
                user_agent: user_agent.map(String::from),
                csrf_token: self.tokens.new_csrf_token(),
            })
            .await?;

        debug!(session = %session.log_id(), user_id, "Session row created");
        Ok(session)
    }

    /// Fetches a session as stored. Absence is `Ok(None)`.
    pub async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        self.repo.find_by_id(session_id).await
    }

    /// Slides the idle window of a live session to `now + idle_ttl`,
    /// capped by its absolute expiry.
    ///
    /// Missing, revoked or expired sessions are silently left alone;
    /// returns whether the row was renewed.
    pub async fn touch(&self, session_id: &str, now: i64) -> AppResult<bool> {
        self.repo
            .touch(session_id, now, self.tokens.idle_ttl())
            .await
    }

    /// Revokes the session, or every session of its owner.
    ///
    /// Unknown identifiers revoke nothing. Returns the number of rows
    /// marked revoked.
    pub async fn revoke(&self, session_id: &str, scope: RevokeScope) -> AppResult<u64> {
        match scope {
            RevokeScope::Single => self.repo.revoke(session_id).await,
            RevokeScope::AllForUser => self.repo.revoke_all_for_owner(session_id).await,
        }
    }

    /// Revokes every session of a user, by user id.
    pub async fn revoke_user(&self, user_id: i64) -> AppResult<u64> {
        self.repo.revoke_all_by_user(user_id).await
    }

    /// All sessions of a user, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        self.repo.find_by_user(user_id).await
    }

    /// The configured idle TTL in seconds.
    pub fn idle_ttl(&self) -> i64 {
        self.tokens.idle_ttl()
    }

    /// The configured absolute TTL in seconds.
    pub fn absolute_ttl(&self) -> i64 {
        self.tokens.absolute_ttl()
    }
}
