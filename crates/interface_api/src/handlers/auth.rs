//! Authentication handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::{create_token, roles};
use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::AppState;

/// Exchanges credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if request.email != state.config.admin_email
        || request.password != state.config.admin_password
    {
        return Err(ApiError::Unauthorized);
    }

    let token = create_token(
        &request.email,
        vec![roles::ADMIN.to_string()],
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|_| ApiError::Internal("token creation failed".to_string()))?;

    Ok(Json(LoginResponse {
        token,
        expires_in_secs: state.config.jwt_expiration_secs,
    }))
}
