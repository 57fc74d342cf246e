//! AI review workflow routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::ai;
use crate::state::AppState;

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/ai/upload", post(ai::upload_image))
        .route("/ai/queue", get(ai::get_queue))
        .route("/ai/review", post(ai::submit_review))
        .route("/ai/review/history", get(ai::review_history))
        .route(
            "/ai/initiation",
            get(ai::get_initiation).put(ai::update_initiation),
        )
        .route("/ai/bounding-boxes", post(ai::set_bounding_boxes))
        .route("/ai/image/:id/bounding-boxes", get(ai::get_bounding_boxes))
}
