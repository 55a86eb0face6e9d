//! Credential store abstraction consumed by the lifecycle engine.

use std::fmt::Debug;

use async_trait::async_trait;

use authn_core::result::AppResult;
use authn_entity::user::User;

/// Read-only view of user accounts plus password verification.
///
/// The engine only ever asks three questions: who is this username, does
/// this password match, and does this user id still exist.
#[async_trait]
pub trait CredentialStore: Send + Sync + Debug + 'static {
    /// Resolve a user by login name.
    async fn lookup(&self, username: &str) -> AppResult<Option<User>>;

    /// Resolve a user by id.
    async fn lookup_by_id(&self, user_id: i64) -> AppResult<Option<User>>;

    /// Check a plaintext password against the user's stored hash.
    async fn verify(&self, user: &User, password: &str) -> AppResult<bool>;

    /// Spend the same effort as [`verify`](Self::verify) when the username
    /// was unknown, so response timing does not reveal account existence.
    async fn verify_unknown(&self, _password: &str) {}
}
