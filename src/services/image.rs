//! Litter image service: upload records, the review queue, verdicts,
//! bounding boxes, and review history.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::detect::Detection;
use crate::error::ApiError;
use crate::models::{
    new_id, BoundingBox, Classification, HumanReview, LitterImage, NewLitterImage, ReviewItem,
    ReviewStatus, VacuumState,
};

/// Queue entries returned when the caller gives no limit
const DEFAULT_QUEUE_LIMIT: i64 = 6;

/// History entries returned when the caller gives no limit
const DEFAULT_HISTORY_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct ImageService {
    db_pool: SqlitePool,
}

impl ImageService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Insert the record for a freshly stored upload.
    ///
    /// New images start pending with an empty classification; the verdict
    /// fields stay null until a reviewer submits one.
    pub async fn record_upload(&self, new_image: NewLitterImage) -> Result<LitterImage, ApiError> {
        let id = new_id("img_");
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO litter_images (
                id, mission_id, drone_id, image_url, local_path, original_filename,
                captured_at, location, classification, review_status, bounding_boxes,
                human_review, vacuum, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new_image.mission_id)
        .bind(&new_image.drone_id)
        .bind(&new_image.image_url)
        .bind(&new_image.local_path)
        .bind(&new_image.original_filename)
        .bind(new_image.captured_at)
        .bind(Json(&new_image.location))
        .bind(Json(Classification::default()))
        .bind(ReviewStatus::Pending)
        .bind(Json(Vec::<BoundingBox>::new()))
        .bind(Json(HumanReview::default()))
        .bind(Json(VacuumState::default()))
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        self.get_image(&id).await
    }

    pub async fn get_image(&self, id: &str) -> Result<LitterImage, ApiError> {
        sqlx::query_as::<_, LitterImage>("SELECT * FROM litter_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Image {} not found", id)))
    }

    /// Oldest pending images first, up to `limit`
    pub async fn pending_queue(&self, limit: Option<i64>) -> Result<Vec<LitterImage>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_QUEUE_LIMIT).clamp(1, 100);

        let images = sqlx::query_as::<_, LitterImage>(
            r#"
            SELECT * FROM litter_images
            WHERE review_status = ?
            ORDER BY captured_at ASC, id ASC
            LIMIT ?
            "#,
        )
        .bind(ReviewStatus::Pending)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(images)
    }

    /// Every pending image, for the analysis sweep
    pub async fn all_pending(&self) -> Result<Vec<LitterImage>, ApiError> {
        let images = sqlx::query_as::<_, LitterImage>(
            r#"
            SELECT * FROM litter_images
            WHERE review_status = ?
            ORDER BY captured_at ASC
            "#,
        )
        .bind(ReviewStatus::Pending)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(images)
    }

    /// Apply one reviewer verdict.
    ///
    /// Overwrites any earlier verdict, so re-reviewing an image is
    /// idempotent. Returns false when the image id is unknown.
    pub async fn apply_review(&self, item: &ReviewItem, reviewer: &str) -> Result<bool, ApiError> {
        let now = Utc::now();
        let review = HumanReview {
            is_litter: Some(item.is_litter),
            litter_class: item.litter_class.clone(),
            weight_grams: item.weight_grams,
            reviewer: Some(reviewer.to_string()),
            reviewed_at: Some(now),
        };

        let result = sqlx::query(
            r#"
            UPDATE litter_images
            SET human_review = ?, review_status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Json(review))
        .bind(ReviewStatus::Reviewed)
        .bind(now)
        .bind(&item.id)
        .execute(&self.db_pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply a batch of verdicts; unknown ids are skipped and reported back
    pub async fn submit_reviews(
        &self,
        items: &[ReviewItem],
        reviewer: &str,
    ) -> Result<(usize, Vec<String>), ApiError> {
        let mut saved = 0;
        let mut skipped = Vec::new();

        for item in items {
            if self.apply_review(item, reviewer).await? {
                saved += 1;
            } else {
                skipped.push(item.id.clone());
            }
        }

        Ok((saved, skipped))
    }

    /// Replace the stored bounding boxes for an image
    pub async fn set_bounding_boxes(
        &self,
        image_id: &str,
        boxes: &[BoundingBox],
    ) -> Result<(), ApiError> {
        let result =
            sqlx::query("UPDATE litter_images SET bounding_boxes = ?, updated_at = ? WHERE id = ?")
                .bind(Json(boxes))
                .bind(Utc::now())
                .bind(image_id)
                .execute(&self.db_pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Image {} not found", image_id)));
        }

        Ok(())
    }

    /// Reviewed images, most recent verdict first
    pub async fn review_history(&self, limit: Option<i64>) -> Result<Vec<LitterImage>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 200);

        let images = sqlx::query_as::<_, LitterImage>(
            r#"
            SELECT * FROM litter_images
            WHERE review_status = ?
            ORDER BY json_extract(human_review, '$.reviewed_at') DESC
            LIMIT ?
            "#,
        )
        .bind(ReviewStatus::Reviewed)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(images)
    }

    /// Write detector output onto an image: the top detection becomes the
    /// classification, all detections become bounding boxes. The review
    /// status is untouched; only a human moves an image out of pending.
    pub async fn apply_detections(
        &self,
        image_id: &str,
        detections: &[Detection],
    ) -> Result<(), ApiError> {
        let top = match detections
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        {
            Some(detection) => detection,
            None => return Ok(()),
        };

        let classification = Classification {
            label: Some(top.label.clone()),
            confidence: Some(top.confidence),
        };

        let boxes: Vec<BoundingBox> = detections
            .iter()
            .map(|d| BoundingBox {
                label: d.label.clone(),
                confidence: d.confidence,
                x: d.x,
                y: d.y,
                width: d.width,
                height: d.height,
            })
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE litter_images
            SET classification = ?, bounding_boxes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Json(classification))
        .bind(Json(boxes))
        .bind(Utc::now())
        .bind(image_id)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Image {} not found", image_id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::GeoPoint;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> ImageService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::initialize_schema(&pool).await.unwrap();
        ImageService::new(pool)
    }

    fn sample_upload() -> NewLitterImage {
        NewLitterImage {
            mission_id: "mission_0a1b2c3d".to_string(),
            drone_id: "drone_0a1b2c3d".to_string(),
            image_url: "http://127.0.0.1:8001/static/litter_images/abc.jpg".to_string(),
            local_path: "static/litter_images/abc.jpg".to_string(),
            original_filename: "photo.jpg".to_string(),
            captured_at: Utc::now(),
            location: GeoPoint::default(),
        }
    }

    #[tokio::test]
    async fn test_apply_detections_writes_top_classification() {
        let service = test_service().await;
        let image = service.record_upload(sample_upload()).await.unwrap();
        assert!(image.classification.0.label.is_none());

        let detections = vec![
            Detection {
                label: "paper".to_string(),
                confidence: 0.70,
                x: 0.1,
                y: 0.1,
                width: 0.2,
                height: 0.2,
            },
            Detection {
                label: "plastic".to_string(),
                confidence: 0.92,
                x: 0.5,
                y: 0.5,
                width: 0.3,
                height: 0.3,
            },
        ];

        service
            .apply_detections(&image.id, &detections)
            .await
            .unwrap();

        let updated = service.get_image(&image.id).await.unwrap();
        assert_eq!(updated.classification.0.label.as_deref(), Some("plastic"));
        assert_eq!(updated.classification.0.confidence, Some(0.92));
        assert_eq!(updated.bounding_boxes.0.len(), 2);
        // Detector output never closes the review loop by itself
        assert_eq!(updated.review_status, ReviewStatus::Pending);
    }

    #[tokio::test]
    async fn test_apply_detections_with_no_detections_is_a_noop() {
        let service = test_service().await;
        let image = service.record_upload(sample_upload()).await.unwrap();

        service.apply_detections(&image.id, &[]).await.unwrap();

        let unchanged = service.get_image(&image.id).await.unwrap();
        assert!(unchanged.classification.0.label.is_none());
        assert!(unchanged.bounding_boxes.0.is_empty());
    }
}
