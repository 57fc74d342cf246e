//! Drone route definitions

use axum::{routing::get, Router};

use crate::handlers::drones;
use crate::state::AppState;

pub fn drone_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/drones",
            get(drones::list_drones).post(drones::create_drone),
        )
        .route(
            "/drones/:id",
            get(drones::get_drone)
                .put(drones::update_drone)
                .delete(drones::delete_drone),
        )
}
