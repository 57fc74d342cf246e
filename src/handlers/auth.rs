//! Authentication HTTP handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::state::AppState;

/// POST /login - Authenticate with username or email and password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let response = state.auth_service.login(request).await?;

    Ok(Json(response))
}
