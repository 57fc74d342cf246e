//! Detection settings and analysis service
//!
//! Owns the settings singleton and drives the detector over the pending
//! queue. Detection results land on images through [`ImageService`], so a
//! later human review still has the final say.

use std::path::Path;

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::detect::LitterDetector;
use crate::error::ApiError;
use crate::models::{AnalysisResponse, DetectionSettings};
use crate::services::ImageService;

#[derive(Clone)]
pub struct DetectionService {
    db_pool: SqlitePool,
    images: ImageService,
    detector: LitterDetector,
}

impl DetectionService {
    pub fn new(db_pool: SqlitePool) -> Self {
        let images = ImageService::new(db_pool.clone());
        Self {
            db_pool,
            images,
            detector: LitterDetector::new(),
        }
    }

    /// Current detection settings, or the defaults when never configured
    pub async fn get_settings(&self) -> Result<DetectionSettings, ApiError> {
        let stored = sqlx::query_scalar::<_, Json<DetectionSettings>>(
            "SELECT config FROM detection_settings WHERE id = 1",
        )
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(stored.map(|config| config.0).unwrap_or_default())
    }

    /// Replace the detection settings wholesale
    pub async fn update_settings(
        &self,
        settings: DetectionSettings,
    ) -> Result<DetectionSettings, ApiError> {
        sqlx::query(
            r#"
            INSERT INTO detection_settings (id, config, updated_at)
            VALUES (1, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                config = excluded.config,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(Json(&settings))
        .bind(Utc::now())
        .execute(&self.db_pool)
        .await?;

        tracing::info!("Detection settings updated");

        Ok(settings)
    }

    /// Run the detector over every pending image and store what it finds.
    ///
    /// Images the detector finds nothing in are left untouched so they stay
    /// in the review queue.
    pub async fn run_analysis(&self) -> Result<AnalysisResponse, ApiError> {
        let settings = self.get_settings().await?;
        let pending = self.images.all_pending().await?;

        if !self.detector.is_ready() {
            tracing::debug!("No detection model loaded, sweep will record no detections");
        }

        let mut detections = 0;
        for image in &pending {
            let found = self
                .detector
                .detect(Path::new(&image.local_path), &settings);
            if found.is_empty() {
                continue;
            }

            detections += found.len();
            self.images.apply_detections(&image.id, &found).await?;
        }

        tracing::info!(
            analyzed = pending.len(),
            detections,
            "Analysis sweep completed"
        );

        Ok(AnalysisResponse {
            analyzed: pending.len(),
            detections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> DetectionService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_schema(&pool).await.unwrap();
        DetectionService::new(pool)
    }

    #[tokio::test]
    async fn test_settings_default_until_configured() {
        let service = test_service().await;

        let settings = service.get_settings().await.unwrap();
        assert_eq!(settings.classes.len(), 3);
        assert_eq!(settings.rtb.battery_pct, 20);
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let service = test_service().await;

        let mut settings = DetectionSettings::default();
        settings.classes[0].conf = 0.9;
        settings.rtb.battery_pct = 35;
        service.update_settings(settings).await.unwrap();

        let stored = service.get_settings().await.unwrap();
        assert_eq!(stored.classes[0].conf, 0.9);
        assert_eq!(stored.rtb.battery_pct, 35);

        // A second update overwrites, not duplicates
        let mut settings = DetectionSettings::default();
        settings.rtb.hold_pct = 60;
        service.update_settings(settings).await.unwrap();

        let stored = service.get_settings().await.unwrap();
        assert_eq!(stored.rtb.battery_pct, 20);
        assert_eq!(stored.rtb.hold_pct, 60);
    }

    #[tokio::test]
    async fn test_analysis_with_no_pending_images() {
        let service = test_service().await;

        let report = service.run_analysis().await.unwrap();
        assert_eq!(report.analyzed, 0);
        assert_eq!(report.detections, 0);
    }
}
