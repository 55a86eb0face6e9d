//! Session and CSRF extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use authn_auth::session::ValidatedSession;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "x-csrf";

/// A validated, freshly renewed session and its user.
///
/// Rejects with the engine's validation error (`no_session`,
/// `invalid_session`, `session_expired` or `user_not_found`).
#[derive(Debug, Clone)]
pub struct AuthSession(pub ValidatedSession);

impl std::ops::Deref for AuthSession {
    type Target = ValidatedSession;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = state.session_cookie.read(&jar);

        let validated = state
            .session_manager
            .validate_and_touch(session_id.as_deref())
            .await?;

        Ok(Self(validated))
    }
}

/// The raw `X-CSRF` header value, if any. Never read from query or body.
#[derive(Debug, Clone, Default)]
pub struct CsrfHeader(pub Option<String>);

impl<S> FromRequestParts<S> for CsrfHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        ))
    }
}
