//! Session introspection handler.

use axum::Json;

use crate::dto::response::SessionInfoResponse;
use crate::extractors::AuthSession;

/// GET /session/me
///
/// Validation renews the session, so the returned `expires_at` already
/// reflects this request.
pub async fn me(auth: AuthSession) -> Json<SessionInfoResponse> {
    let AuthSession(validated) = auth;
    Json(SessionInfoResponse {
        session_id: validated.session.session_id,
        user: validated.user,
        expires_at: validated.session.expires_at,
        absolute_expires_at: validated.session.absolute_expires_at,
    })
}
