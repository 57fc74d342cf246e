//! Base station and patrol route HTTP handlers
//!
//! Routes nest under the base surface (`/bases/routes`) because the ops
//! UI manages both from the same screen.

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{
    BaseStation, CreateBaseRequest, CreateRouteRequest, MessageResponse, PatrolRoute,
    UpdateBaseRequest, UpdateRouteRequest,
};
use crate::state::AppState;

/// GET /bases - List all base stations
pub async fn list_bases(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<BaseStation>>, ApiError> {
    let bases = state.base_service.list_bases().await?;

    Ok(Json(bases))
}

/// GET /bases/:id - Fetch a single base station
pub async fn get_base(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<BaseStation>, ApiError> {
    let base = state.base_service.get_base(&id).await?;

    Ok(Json(base))
}

/// POST /bases - Create a base station
pub async fn create_base(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateBaseRequest>,
) -> Result<Json<BaseStation>, ApiError> {
    request.validate()?;

    let created = state.base_service.create_base(request).await?;

    Ok(Json(created))
}

/// PUT /bases/:id - Partially update a base station
pub async fn update_base(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBaseRequest>,
) -> Result<Json<BaseStation>, ApiError> {
    request.validate()?;

    let updated = state.base_service.update_base(&id, request).await?;

    Ok(Json(updated))
}

/// DELETE /bases/:id - Delete a base station
pub async fn delete_base(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.base_service.delete_base(&id).await?;

    Ok(Json(MessageResponse {
        message: "Base deleted successfully".to_string(),
    }))
}

/// GET /bases/routes - List all patrol routes
pub async fn list_patrol_routes(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<PatrolRoute>>, ApiError> {
    let routes = state.route_service.list_routes().await?;

    Ok(Json(routes))
}

/// GET /bases/routes/:id - Fetch a single patrol route
pub async fn get_patrol_route(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<PatrolRoute>, ApiError> {
    let route = state.route_service.get_route(&id).await?;

    Ok(Json(route))
}

/// POST /bases/routes - Create a patrol route
pub async fn create_patrol_route(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<PatrolRoute>, ApiError> {
    request.validate()?;

    let created = state.route_service.create_route(request).await?;

    Ok(Json(created))
}

/// PUT /bases/routes/:id - Partially update a patrol route
pub async fn update_patrol_route(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<PatrolRoute>, ApiError> {
    request.validate()?;

    let updated = state.route_service.update_route(&id, request).await?;

    Ok(Json(updated))
}

/// DELETE /bases/routes/:id - Delete a patrol route
pub async fn delete_patrol_route(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.route_service.delete_route(&id).await?;

    Ok(Json(MessageResponse {
        message: "Route deleted successfully".to_string(),
    }))
}
