//! Litter image models and review workflow payloads
//!
//! A litter image is the only entity with a lifecycle: it is created on
//! upload in `pending` state, optionally annotated by the detector, and
//! moved to `reviewed` when a human confirms or rejects the AI call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Coordinates used when an upload carries no location (central London)
pub const DEFAULT_COORDINATES: [f64; 2] = [-0.12345, 51.56789];

/// Review lifecycle state of a litter image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Reviewed,
}

/// GeoJSON point, coordinates as `[longitude, latitude]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub point_type: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            point_type: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(DEFAULT_COORDINATES[0], DEFAULT_COORDINATES[1])
    }
}

/// AI classification; both fields stay null until the detector has run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    pub label: Option<String>,
    pub confidence: Option<f64>,
}

/// A detected region within an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    pub label: String,
    pub confidence: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Human review verdict; populated iff the image is `reviewed`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HumanReview {
    pub is_litter: Option<bool>,
    pub litter_class: Option<String>,
    pub weight_grams: Option<i64>,
    pub reviewer: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Vacuum collection state for the detected litter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VacuumState {
    pub command_issued: bool,
    pub result: Option<String>,
}

/// Stored litter image record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LitterImage {
    pub id: String,
    pub mission_id: String,
    pub drone_id: String,
    pub image_url: String,
    #[serde(skip_serializing)]
    pub local_path: String,
    pub original_filename: String,
    pub captured_at: DateTime<Utc>,
    pub location: Json<GeoPoint>,
    pub classification: Json<Classification>,
    pub review_status: ReviewStatus,
    pub bounding_boxes: Json<Vec<BoundingBox>>,
    pub human_review: Json<HumanReview>,
    pub vacuum: Json<VacuumState>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the upload handler supplies for a new image record
#[derive(Debug, Clone)]
pub struct NewLitterImage {
    pub mission_id: String,
    pub drone_id: String,
    pub image_url: String,
    pub local_path: String,
    pub original_filename: String,
    pub captured_at: DateTime<Utc>,
    pub location: GeoPoint,
}

/// Response returned by the upload endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub image_id: String,
    pub image_url: String,
}

/// One entry in the pending review queue
#[derive(Debug, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: String,
    pub image_url: String,
    pub ai_class: String,
    pub ai_conf: f64,
    pub mission_id: String,
    pub ts: DateTime<Utc>,
}

impl From<LitterImage> for QueueItem {
    fn from(image: LitterImage) -> Self {
        let classification = image.classification.0;
        Self {
            id: image.id,
            image_url: image.image_url,
            ai_class: classification
                .label
                .unwrap_or_else(|| "unknown".to_string()),
            ai_conf: classification.confidence.unwrap_or(0.0),
            mission_id: image.mission_id,
            ts: image.captured_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueueResponse {
    pub items: Vec<QueueItem>,
}

/// Query parameters accepted by the review queue
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    /// Accepted for API compatibility; queue entries are not assigned per reviewer
    pub reviewer: Option<String>,
    pub limit: Option<i64>,
}

/// A single human verdict submitted from the review screen
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewItem {
    pub id: String,
    pub is_litter: bool,
    pub litter_class: Option<String>,
    pub weight_grams: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReviewRequest {
    pub items: Vec<ReviewItem>,
}

/// Outcome of a review submission; unknown image ids are reported, not errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub ok: bool,
    pub saved: usize,
    pub skipped: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BoundingBoxUpdateRequest {
    pub image_id: String,
    pub bounding_boxes: Vec<BoundingBox>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoundingBoxResponse {
    pub image_id: String,
    pub bounding_boxes: Vec<BoundingBox>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// One entry in the review history, newest review first
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub ts: DateTime<Utc>,
    pub mission_id: String,
    pub ai_result: String,
    pub reviewer: String,
    pub decision: String,
}

impl From<LitterImage> for HistoryItem {
    fn from(image: LitterImage) -> Self {
        let classification = image.classification.0;
        let review = image.human_review.0;

        let label = classification
            .label
            .unwrap_or_else(|| "unknown".to_string());
        let confidence_pct = (classification.confidence.unwrap_or(0.0) * 100.0) as i64;

        // The stored verdict is a boolean, so history exposes a two-valued
        // decision derived from it.
        let decision = if review.is_litter.unwrap_or(false) {
            "approved"
        } else {
            "rejected"
        };

        Self {
            id: image.id,
            ts: review.reviewed_at.unwrap_or(image.updated_at),
            mission_id: image.mission_id,
            ai_result: format!("{}@{}%", label, confidence_pct),
            reviewer: review.reviewer.unwrap_or_else(|| "unknown".to_string()),
            decision: decision.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> LitterImage {
        let now = Utc::now();
        LitterImage {
            id: "img_a1b2c3d4".to_string(),
            mission_id: "mission_0a1b2c3d".to_string(),
            drone_id: "drone_0a1b2c3d".to_string(),
            image_url: "http://127.0.0.1:8001/static/litter_images/abc.jpg".to_string(),
            local_path: "static/litter_images/abc.jpg".to_string(),
            original_filename: "photo.jpg".to_string(),
            captured_at: now,
            location: Json(GeoPoint::default()),
            classification: Json(Classification::default()),
            review_status: ReviewStatus::Pending,
            bounding_boxes: Json(Vec::new()),
            human_review: Json(HumanReview::default()),
            vacuum: Json(VacuumState::default()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_queue_item_falls_back_when_unclassified() {
        let item = QueueItem::from(sample_image());
        assert_eq!(item.ai_class, "unknown");
        assert_eq!(item.ai_conf, 0.0);
    }

    #[test]
    fn test_queue_item_uses_classification() {
        let mut image = sample_image();
        image.classification = Json(Classification {
            label: Some("plastic".to_string()),
            confidence: Some(0.91),
        });

        let item = QueueItem::from(image);
        assert_eq!(item.ai_class, "plastic");
        assert_eq!(item.ai_conf, 0.91);
    }

    #[test]
    fn test_history_decision_approved() {
        let mut image = sample_image();
        image.review_status = ReviewStatus::Reviewed;
        image.classification = Json(Classification {
            label: Some("plastic".to_string()),
            confidence: Some(0.85),
        });
        image.human_review = Json(HumanReview {
            is_litter: Some(true),
            litter_class: Some("plastic".to_string()),
            weight_grams: Some(120),
            reviewer: Some("admin".to_string()),
            reviewed_at: Some(Utc::now()),
        });

        let item = HistoryItem::from(image);
        assert_eq!(item.decision, "approved");
        assert_eq!(item.ai_result, "plastic@85%");
        assert_eq!(item.reviewer, "admin");
    }

    #[test]
    fn test_history_decision_rejected() {
        let mut image = sample_image();
        image.review_status = ReviewStatus::Reviewed;
        image.human_review = Json(HumanReview {
            is_litter: Some(false),
            reviewer: Some("admin".to_string()),
            reviewed_at: Some(Utc::now()),
            ..HumanReview::default()
        });

        let item = HistoryItem::from(image);
        assert_eq!(item.decision, "rejected");
        assert_eq!(item.ai_result, "unknown@0%");
    }

    #[test]
    fn test_default_location_is_fallback_point() {
        let point = GeoPoint::default();
        assert_eq!(point.point_type, "Point");
        assert_eq!(point.coordinates, DEFAULT_COORDINATES);
    }
}
