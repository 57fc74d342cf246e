//! Analysis routes

use axum::{routing::post, Router};

use crate::handlers::analysis;
use crate::state::AppState;

pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analysis/run", post(analysis::run_analysis))
}
