//! Auth handlers: login and logout.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::cookie::CookieJar;

use authn_core::error::AppError;

use crate::dto::request::{LoginRequest, LogoutRequest};
use crate::dto::response::{LoginResponse, OkResponse};
use crate::error::ApiError;
use crate::extractors::{ClientMeta, CsrfHeader};
use crate::state::AppState;

/// POST /login
///
/// Sets the session cookie and returns the CSRF token the client must
/// echo in `X-CSRF` on state-changing requests.
pub async fn login(
    State(state): State<AppState>,
    client: ClientMeta,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(req) = body?;

    let result = state
        .session_manager
        .login(
            &req.username,
            &req.password,
            client.ip.as_deref(),
            client.user_agent.as_deref(),
        )
        .await?;

    let jar = state.session_cookie.issue(jar, result.session_id);
    Ok((
        jar,
        Json(LoginResponse {
            user: result.user,
            csrf_token: result.csrf_token,
        }),
    ))
}

/// POST /logout
///
/// The body is optional; `{"all_devices": true}` revokes every session of
/// the user. Clears the session cookie on success.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    CsrfHeader(csrf): CsrfHeader,
    body: Bytes,
) -> Result<(CookieJar, Json<OkResponse>), ApiError> {
    let req: LogoutRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LogoutRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(AppError::from)?
    };

    let session_id = state.session_cookie.read(&jar);
    state
        .session_manager
        .logout(session_id.as_deref(), csrf.as_deref(), req.all_devices)
        .await?;

    let jar = state.session_cookie.clear(jar);
    Ok((jar, Json(OkResponse::ok())))
}
