//! Route definitions for the SkySweep API

mod ai;
mod analysis;
mod auth;
mod bases;
mod drones;
mod roles;
mod users;

pub use ai::ai_routes;
pub use analysis::analysis_routes;
pub use auth::auth_routes;
pub use bases::base_routes;
pub use drones::drone_routes;
pub use roles::role_routes;
pub use users::user_routes;

use axum::extract::{DefaultBodyLimit, State};
use axum::{routing::get, Json, Router};
use tower_http::services::ServeDir;

use crate::db;
use crate::middleware;
use crate::state::AppState;

/// Largest accepted request body; uploads are the only large payloads
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Assemble the full application router.
///
/// CORS is left to the caller so tests can skip it.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.storage_dir);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(ai_routes())
        .merge(analysis_routes())
        .merge(user_routes())
        .merge(role_routes())
        .merge(drone_routes())
        .merge(base_routes())
        .nest_service("/static/litter_images", static_files)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}

async fn root() -> &'static str {
    "SkySweep API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// GET /health - Service and database health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::check_health(&state.db_pool).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if database == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
