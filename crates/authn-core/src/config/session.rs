//! Session lifetime and cookie configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session lifetime policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle TTL in seconds; renewed on every validated access.
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_seconds: u64,
    /// Absolute TTL in seconds; fixed at session creation.
    #[serde(default = "default_absolute_ttl")]
    pub absolute_ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_seconds: default_idle_ttl(),
            absolute_ttl_seconds: default_absolute_ttl(),
        }
    }
}

impl SessionConfig {
    /// Idle TTL as signed seconds for timestamp arithmetic.
    pub fn idle_ttl(&self) -> i64 {
        i64::try_from(self.idle_ttl_seconds).unwrap_or(i64::MAX)
    }

    /// Absolute TTL as signed seconds for timestamp arithmetic.
    pub fn absolute_ttl(&self) -> i64 {
        i64::try_from(self.absolute_ttl_seconds).unwrap_or(i64::MAX)
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.idle_ttl_seconds == 0 || self.absolute_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "session.idle_ttl_seconds and session.absolute_ttl_seconds must be positive",
            ));
        }
        Ok(())
    }
}

/// `SameSite` attribute applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    /// Sent on top-level navigations and same-site requests.
    #[default]
    Lax,
    /// Sent on same-site requests only.
    Strict,
    /// Sent on all requests; browsers require `Secure`.
    None,
}

impl fmt::Display for SameSitePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lax => write!(f, "lax"),
            Self::Strict => write!(f, "strict"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie name carrying the session identifier.
    #[serde(default = "default_cookie_name")]
    pub name: String,
    /// Whether the cookie carries the `Secure` flag. Off in development.
    #[serde(default)]
    pub secure: bool,
    /// `SameSite` policy.
    #[serde(default)]
    pub same_site: SameSitePolicy,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            secure: false,
            same_site: SameSitePolicy::default(),
        }
    }
}

impl CookieConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::configuration("cookie.name must not be empty"));
        }
        if self.same_site == SameSitePolicy::None && !self.secure {
            return Err(AppError::configuration(
                "cookie.same_site = \"none\" requires cookie.secure = true",
            ));
        }
        Ok(())
    }
}

fn default_idle_ttl() -> u64 {
    8 * 60 * 60
}

fn default_absolute_ttl() -> u64 {
    30 * 24 * 60 * 60
}

fn default_cookie_name() -> String {
    "op_sid".to_string()
}
