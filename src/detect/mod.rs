//! Litter detection placeholder
//!
//! No model is bundled with the server. The detector keeps the full
//! interface the analysis pass needs (thresholds in, detections out) and
//! returns no detections until a real model is wired in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::DetectionSettings;

/// A single detection produced by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Placeholder litter detector
#[derive(Debug, Clone, Default)]
pub struct LitterDetector;

impl LitterDetector {
    pub fn new() -> Self {
        Self
    }

    /// Whether a model is loaded and detections can be produced
    pub fn is_ready(&self) -> bool {
        false
    }

    /// Run detection against an image on disk.
    ///
    /// Returns detections at or above the configured per-class thresholds.
    /// With no model loaded this is always empty.
    pub fn detect(&self, _image_path: &Path, _settings: &DetectionSettings) -> Vec<Detection> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_without_model_yields_nothing() {
        let detector = LitterDetector::new();
        assert!(!detector.is_ready());

        let detections = detector.detect(
            Path::new("static/litter_images/missing.jpg"),
            &DetectionSettings::default(),
        );
        assert!(detections.is_empty());
    }
}
