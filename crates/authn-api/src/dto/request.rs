//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Logout request body. An empty body means a single-device logout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Revoke every session of the user, not just this one.
    #[serde(default)]
    pub all_devices: bool,
}

/// Dev-only user creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "username/password required"))]
    pub username: String,
    #[validate(length(min = 1, message = "username/password required"))]
    pub password: String,
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}
