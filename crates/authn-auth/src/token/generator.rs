//! Random token generation and expiry policy.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;

use authn_core::config::SessionConfig;

/// Bytes of entropy per token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Produces session identifiers, CSRF tokens and session expiries.
///
/// Tokens are 32 random bytes from the thread-local CSPRNG, encoded as
/// unpadded URL-safe base64 (43 characters), so they are valid both as
/// cookie values and as header values.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    idle_ttl: i64,
    absolute_ttl: i64,
}

impl TokenGenerator {
    /// Creates a generator using the configured TTLs.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            idle_ttl: config.idle_ttl(),
            absolute_ttl: config.absolute_ttl(),
        }
    }

    /// A fresh session identifier.
    pub fn new_session_id(&self) -> String {
        random_token()
    }

    /// A fresh CSRF token.
    pub fn new_csrf_token(&self) -> String {
        random_token()
    }

    /// `(expires_at, absolute_expires_at)` for a session created at `now`.
    ///
    /// The idle expiry is capped by the absolute one.
    pub fn session_expiries(&self, now: i64) -> (i64, i64) {
        let absolute = now.saturating_add(self.absolute_ttl);
        let idle = now.saturating_add(self.idle_ttl).min(absolute);
        (idle, absolute)
    }

    /// Idle TTL in seconds.
    pub fn idle_ttl(&self) -> i64 {
        self.idle_ttl
    }

    /// Absolute TTL in seconds.
    pub fn absolute_ttl(&self) -> i64 {
        self.absolute_ttl
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
