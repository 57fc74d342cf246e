//! Application state shared across all request handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::config::Config;
use crate::services::{
    BaseService, DetectionService, DroneService, ImageService, RoleService, RouteService,
    UserService,
};

/// Shared application state passed to the router.
///
/// Services are wrapped in `Arc` so handlers can extract them individually
/// via `FromRef` without cloning the underlying pools.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    pub drone_service: Arc<DroneService>,
    pub base_service: Arc<BaseService>,
    pub route_service: Arc<RouteService>,
    pub image_service: Arc<ImageService>,
    pub detection_service: Arc<DetectionService>,
    pub config: Arc<Config>,
    pub db_pool: SqlitePool,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Arc<Config>) -> Self {
        let auth_service = Arc::new(AuthService::new(
            db_pool.clone(),
            config.jwt_secret.clone(),
            config.session_ttl_seconds,
        ));
        let user_service = Arc::new(UserService::new(db_pool.clone()));
        let role_service = Arc::new(RoleService::new(db_pool.clone()));
        let drone_service = Arc::new(DroneService::new(db_pool.clone()));
        let base_service = Arc::new(BaseService::new(db_pool.clone()));
        let route_service = Arc::new(RouteService::new(db_pool.clone()));
        let image_service = Arc::new(ImageService::new(db_pool.clone()));
        let detection_service = Arc::new(DetectionService::new(db_pool.clone()));

        Self {
            auth_service,
            user_service,
            role_service,
            drone_service,
            base_service,
            route_service,
            image_service,
            detection_service,
            config,
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(state: &AppState) -> Self {
        state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<RoleService> {
    fn from_ref(state: &AppState) -> Self {
        state.role_service.clone()
    }
}

impl FromRef<AppState> for Arc<DroneService> {
    fn from_ref(state: &AppState) -> Self {
        state.drone_service.clone()
    }
}

impl FromRef<AppState> for Arc<BaseService> {
    fn from_ref(state: &AppState) -> Self {
        state.base_service.clone()
    }
}

impl FromRef<AppState> for Arc<RouteService> {
    fn from_ref(state: &AppState) -> Self {
        state.route_service.clone()
    }
}

impl FromRef<AppState> for Arc<ImageService> {
    fn from_ref(state: &AppState) -> Self {
        state.image_service.clone()
    }
}

impl FromRef<AppState> for Arc<DetectionService> {
    fn from_ref(state: &AppState) -> Self {
        state.detection_service.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}
