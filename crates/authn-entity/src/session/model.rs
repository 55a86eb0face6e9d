//! Session entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One authenticated browser/device binding.
///
/// Timestamps are whole seconds since the Unix epoch. `expires_at` slides
/// forward on each validated access but never past `absolute_expires_at`,
/// which is fixed at creation. `revoked` only ever goes from `false` to
/// `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Opaque random identifier, carried in the session cookie.
    pub session_id: String,
    /// The user this session belongs to.
    pub user_id: i64,
    /// When the session was created (login time).
    pub created_at: i64,
    /// Last validated access.
    pub last_seen: i64,
    /// Sliding idle expiry.
    pub expires_at: i64,
    /// Hard lifetime ceiling.
    pub absolute_expires_at: i64,
    /// Client address at login. Advisory only.
    pub ip: Option<String>,
    /// User-Agent header at login. Advisory only.
    pub user_agent: Option<String>,
    /// Random token the client must echo in `X-CSRF` on state changes.
    pub csrf_token: String,
    /// Terminal revocation flag.
    pub revoked: bool,
}

/// Lifecycle state of a session at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Usable; the next validated access renews it.
    Active,
    /// Past its idle or absolute expiry. Terminal.
    Expired,
    /// Explicitly revoked. Terminal.
    Revoked,
}

impl Session {
    /// Evaluates the session's state at `now`.
    ///
    /// Revocation takes precedence over expiry.
    pub fn state_at(&self, now: i64) -> SessionState {
        if self.revoked {
            SessionState::Revoked
        } else if self.is_expired_at(now) {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }

    /// Whether either expiry has been reached at `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at || now >= self.absolute_expires_at
    }

    /// Whether the session authorizes requests at `now`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.state_at(now) == SessionState::Active
    }

    /// Short identifier prefix, safe to log.
    pub fn log_id(&self) -> &str {
        let end = self
            .session_id
            .char_indices()
            .nth(8)
            .map_or(self.session_id.len(), |(i, _)| i);
        &self.session_id[..end]
    }
}

/// Data required to insert a new session row.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// Freshly generated session identifier.
    pub session_id: String,
    /// The owning user.
    pub user_id: i64,
    /// Creation time; also the initial `last_seen`.
    pub created_at: i64,
    /// Initial idle expiry.
    pub expires_at: i64,
    /// Hard lifetime ceiling.
    pub absolute_expires_at: i64,
    /// Client address.
    pub ip: Option<String>,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Freshly generated CSRF token.
    pub csrf_token: String,
}
