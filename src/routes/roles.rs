//! Role route definitions

use axum::{routing::get, Router};

use crate::handlers::roles;
use crate::state::AppState;

pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/:id",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
}
