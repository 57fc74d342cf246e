//! Analysis HTTP handlers

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::AnalysisResponse;
use crate::state::AppState;

/// POST /analysis/run - Run the detector over every pending image
pub async fn run_analysis(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let report = state.detection_service.run_analysis().await?;

    Ok(Json(report))
}
