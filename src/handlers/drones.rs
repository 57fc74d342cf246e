//! Drone fleet HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{CreateDroneRequest, Drone, MessageResponse, UpdateDroneRequest};
use crate::state::AppState;

/// GET /drones - List all drones
pub async fn list_drones(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Drone>>, ApiError> {
    let drones = state.drone_service.list_drones().await?;

    Ok(Json(drones))
}

/// GET /drones/:id - Fetch a single drone
pub async fn get_drone(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Drone>, ApiError> {
    let drone = state.drone_service.get_drone(&id).await?;

    Ok(Json(drone))
}

/// POST /drones - Register a drone
pub async fn create_drone(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateDroneRequest>,
) -> Result<Json<Drone>, ApiError> {
    request.validate()?;

    let created = state.drone_service.create_drone(request).await?;

    Ok(Json(created))
}

/// PUT /drones/:id - Partially update a drone
pub async fn update_drone(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateDroneRequest>,
) -> Result<Json<Drone>, ApiError> {
    request.validate()?;

    let updated = state.drone_service.update_drone(&id, request).await?;

    Ok(Json(updated))
}

/// DELETE /drones/:id - Delete a drone
pub async fn delete_drone(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.drone_service.delete_drone(&id).await?;

    Ok(Json(MessageResponse {
        message: "Drone deleted successfully".to_string(),
    }))
}
