//! Role management HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{CreateRoleRequest, MessageResponse, Role, UpdateRoleRequest};
use crate::state::AppState;

/// GET /roles - List all roles
pub async fn list_roles(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Role>>, ApiError> {
    let roles = state.role_service.list_roles().await?;

    Ok(Json(roles))
}

/// GET /roles/:id - Fetch a single role
pub async fn get_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Role>, ApiError> {
    let role = state.role_service.get_role(&id).await?;

    Ok(Json(role))
}

/// POST /roles - Create a role
pub async fn create_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    request.validate()?;

    let created = state.role_service.create_role(request).await?;

    Ok(Json(created))
}

/// PUT /roles/:id - Partially update a role
pub async fn update_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    request.validate()?;

    let updated = state.role_service.update_role(&id, request).await?;

    Ok(Json(updated))
}

/// DELETE /roles/:id - Delete a role
pub async fn delete_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.role_service.delete_role(&id).await?;

    Ok(Json(MessageResponse {
        message: "Role deleted successfully".to_string(),
    }))
}
