//! Base station and patrol route definitions
//!
//! `/bases/routes` is registered alongside `/bases/:id`; the static
//! segment wins, so a base can never be fetched with the id "routes".

use axum::{routing::get, Router};

use crate::handlers::bases;
use crate::state::AppState;

pub fn base_routes() -> Router<AppState> {
    Router::new()
        .route("/bases", get(bases::list_bases).post(bases::create_base))
        .route(
            "/bases/routes",
            get(bases::list_patrol_routes).post(bases::create_patrol_route),
        )
        .route(
            "/bases/routes/:id",
            get(bases::get_patrol_route)
                .put(bases::update_patrol_route)
                .delete(bases::delete_patrol_route),
        )
        .route(
            "/bases/:id",
            get(bases::get_base)
                .put(bases::update_base)
                .delete(bases::delete_base),
        )
}
