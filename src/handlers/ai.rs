//! AI review workflow HTTP handlers
//!
//! Uploads from drones land here, join the pending queue, and leave it
//! once a human verdict is applied.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{
    new_id, BoundingBoxResponse, BoundingBoxUpdateRequest, DetectionSettings, GeoPoint,
    HistoryItem, HistoryQuery, HistoryResponse, NewLitterImage, OkResponse, QueueItem, QueueQuery,
    QueueResponse, ReviewRequest, ReviewResponse, UploadResponse,
};
use crate::state::AppState;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// POST /ai/upload - Store a drone capture and queue it for review
///
/// Multipart fields: `file` (required), `mission_id`, `drone_id`,
/// `longitude`, `latitude`. Missing ids are synthesized; missing or
/// unparsable coordinates fall back to the default location.
pub async fn upload_image(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file_bytes = None;
    let mut original_filename = String::new();
    let mut mission_id = None;
    let mut drone_id = None;
    let mut longitude = None;
    let mut latitude = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                original_filename = field.file_name().unwrap_or("capture.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                file_bytes = Some(data);
            }
            "mission_id" => {
                let value = read_text_field(field).await?;
                if !value.is_empty() {
                    mission_id = Some(value);
                }
            }
            "drone_id" => {
                let value = read_text_field(field).await?;
                if !value.is_empty() {
                    drone_id = Some(value);
                }
            }
            "longitude" => {
                longitude = read_text_field(field).await?.parse::<f64>().ok();
            }
            "latitude" => {
                latitude = read_text_field(field).await?.parse::<f64>().ok();
            }
            _ => {}
        }
    }

    let data = file_bytes.ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

    let extension = std::path::Path::new(&original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported file type, expected one of: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let location = match (longitude, latitude) {
        (Some(lon), Some(lat)) => GeoPoint::new(lon, lat),
        _ => GeoPoint::default(),
    };

    let stored_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
    let local_path = std::path::Path::new(&state.config.storage_dir).join(&stored_name);

    tokio::fs::write(&local_path, &data).await.map_err(|e| {
        tracing::error!("Failed to write uploaded image to disk: {}", e);
        ApiError::InternalError("Failed to store uploaded image".to_string())
    })?;

    let new_image = NewLitterImage {
        mission_id: mission_id.unwrap_or_else(|| new_id("mission_")),
        drone_id: drone_id.unwrap_or_else(|| new_id("drone_")),
        image_url: format!(
            "{}/static/litter_images/{}",
            state.config.public_base_url, stored_name
        ),
        local_path: local_path.to_string_lossy().into_owned(),
        original_filename,
        captured_at: Utc::now(),
        location,
    };

    match state.image_service.record_upload(new_image).await {
        Ok(image) => Ok(Json(UploadResponse {
            success: true,
            message: "Image uploaded and queued for review".to_string(),
            image_id: image.id,
            image_url: image.image_url,
        })),
        Err(e) => {
            // No record points at the stored file; remove it
            if let Err(unlink_err) = tokio::fs::remove_file(&local_path).await {
                tracing::warn!("Failed to remove orphaned upload: {}", unlink_err);
            }
            Err(e)
        }
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    let value = field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?;

    Ok(value.trim().to_string())
}

/// GET /ai/queue - Pending images awaiting human review, oldest first
pub async fn get_queue(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<QueueQuery>,
) -> Result<Json<QueueResponse>, ApiError> {
    let images = state.image_service.pending_queue(query.limit).await?;
    let items = images.into_iter().map(QueueItem::from).collect();

    Ok(Json(QueueResponse { items }))
}

/// POST /ai/review - Apply one or more human verdicts
pub async fn submit_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let (saved, skipped) = state
        .image_service
        .submit_reviews(&request.items, &user.username)
        .await?;

    Ok(Json(ReviewResponse {
        ok: true,
        saved,
        skipped,
    }))
}

/// GET /ai/review/history - Reviewed images, most recent verdict first
pub async fn review_history(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let images = state.image_service.review_history(query.limit).await?;
    let items = images.into_iter().map(HistoryItem::from).collect();

    Ok(Json(HistoryResponse { items }))
}

/// GET /ai/initiation - Current detection thresholds and RTB policy
pub async fn get_initiation(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<DetectionSettings>, ApiError> {
    let settings = state.detection_service.get_settings().await?;

    Ok(Json(settings))
}

/// PUT /ai/initiation - Replace detection thresholds and RTB policy
pub async fn update_initiation(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(settings): Json<DetectionSettings>,
) -> Result<Json<DetectionSettings>, ApiError> {
    let settings = state.detection_service.update_settings(settings).await?;

    Ok(Json(settings))
}

/// POST /ai/bounding-boxes - Replace the boxes stored for an image
pub async fn set_bounding_boxes(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<BoundingBoxUpdateRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state
        .image_service
        .set_bounding_boxes(&request.image_id, &request.bounding_boxes)
        .await?;

    Ok(Json(OkResponse { ok: true }))
}

/// GET /ai/image/:id/bounding-boxes - Boxes currently stored for an image
pub async fn get_bounding_boxes(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<BoundingBoxResponse>, ApiError> {
    let image = state.image_service.get_image(&id).await?;

    Ok(Json(BoundingBoxResponse {
        image_id: image.id,
        bounding_boxes: image.bounding_boxes.0,
    }))
}
