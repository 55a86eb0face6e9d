//! Development-only account seeding.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::info;
use validator::{Validate, ValidationErrors};

use authn_auth::credential::NewAccount;
use authn_core::error::AppError;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::CreateUserResponse;
use crate::error::ApiError;
use crate::state::AppState;

const CREDENTIALS_REQUIRED: &str = "username/password required";

/// POST /dev/create-user
///
/// Only available when both `dev.enabled` and `dev.local_users` are set.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    if !state.config.dev.user_seeding_allowed() {
        return Err(AppError::forbidden("dev endpoint disabled").into());
    }

    let Json(req) = body?;
    req.validate()
        .map_err(|e| AppError::validation(validation_message(&e)))?;

    let user = state
        .credentials
        .register(NewAccount {
            username: req.username,
            password: req.password,
            email: req.email,
            given_name: req.given_name,
            family_name: req.family_name,
            is_admin: req.is_admin,
        })
        .await?;

    info!(user_id = user.id, "Dev user created");
    Ok(Json(CreateUserResponse {
        user: user.public_view(),
    }))
}

/// Missing credentials take precedence over other field errors.
fn validation_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    if fields.contains_key("username") || fields.contains_key("password") {
        return CREDENTIALS_REQUIRED.to_string();
    }
    fields
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
