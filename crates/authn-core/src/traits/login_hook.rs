//! Hook point for login-attempt policies (lockout, backoff, auditing).
//!
//! The engine invokes [`LoginAttemptHook::on_failure`] on every
//! `InvalidCredentials` outcome and [`LoginAttemptHook::on_success`]
//! after a session has been issued. No policy ships with the service;
//! [`NoopLoginHook`] is the default.

use std::fmt::Debug;

use async_trait::async_trait;

/// Observer of login attempts.
#[async_trait]
pub trait LoginAttemptHook: Send + Sync + Debug + 'static {
    /// Called once per rejected login, whether the username was unknown
    /// or the password was wrong.
    async fn on_failure(&self, _username: &str, _client_ip: Option<&str>) {}

    /// Called once per successful login.
    async fn on_success(&self, _user_id: i64) {}
}

/// Hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoginHook;

#[async_trait]
impl LoginAttemptHook for NoopLoginHook {}
