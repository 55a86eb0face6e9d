//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A locally stored user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash (PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Given name (optional).
    pub given_name: Option<String>,
    /// Family name (optional).
    pub family_name: Option<String>,
    /// Administrator flag.
    pub is_admin: bool,
    /// Consecutive failed login attempts. Maintained by lockout hooks.
    pub failed_attempts: i64,
    /// Lockout ceiling, if a hook has set one.
    pub locked_until: Option<i64>,
    /// When the password was last set.
    pub password_changed_at: i64,
}

impl User {
    /// The fields that may leave the service.
    pub fn public_view(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
        }
    }
}

/// Public-facing user profile. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Given name (optional).
    pub given_name: Option<String>,
    /// Family name (optional).
    pub family_name: Option<String>,
    /// Administrator flag.
    pub is_admin: bool,
    /// Password set time.
    pub password_changed_at: i64,
}
