//! User management HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use crate::state::AppState;

/// GET /users - List all users with their resolved role names
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users))
}

/// GET /users/:id - Fetch a single user
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_user(&id).await?;

    Ok(Json(user))
}

/// POST /users - Create a user
pub async fn create_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let created = state.user_service.create_user(request).await?;

    Ok(Json(created))
}

/// PUT /users/:id - Partially update a user
pub async fn update_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let updated = state.user_service.update_user(&id, request).await?;

    Ok(Json(updated))
}

/// DELETE /users/:id - Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.user_service.delete_user(&id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
