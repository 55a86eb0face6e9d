//! Liveness handler.

use axum::Json;

use crate::dto::response::OkResponse;

/// GET /healthz
pub async fn healthz() -> Json<OkResponse> {
    Json(OkResponse::ok())
}
