//! Response DTOs.

use serde::{Deserialize, Serialize};

use authn_entity::user::UserPublic;

/// Body of a successful login. The session id travels only in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserPublic,
    pub csrf_token: String,
}

/// Body of `GET /session/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub session_id: String,
    pub user: UserPublic,
    pub expires_at: i64,
    pub absolute_expires_at: i64,
}

/// `{"ok": true}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Body of a successful dev user creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserPublic,
}
