//! Detection configuration models
//!
//! Per-class confidence thresholds and the return-to-base policy the
//! detector is initiated with. Stored as a singleton record.

use serde::{Deserialize, Serialize};

/// Minimum confidence for a class to count as a detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassThreshold {
    #[serde(rename = "class")]
    pub class_name: String,
    pub conf: f64,
}

/// Return-to-base policy: battery floor and hold capacity ceiling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtbPolicy {
    pub battery_pct: i64,
    pub hold_pct: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSettings {
    pub classes: Vec<ClassThreshold>,
    pub rtb: RtbPolicy,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            classes: vec![
                ClassThreshold {
                    class_name: "plastic".to_string(),
                    conf: 0.85,
                },
                ClassThreshold {
                    class_name: "glass".to_string(),
                    conf: 0.75,
                },
                ClassThreshold {
                    class_name: "paper".to_string(),
                    conf: 0.65,
                },
            ],
            rtb: RtbPolicy {
                battery_pct: 20,
                hold_pct: 80,
            },
        }
    }
}

/// Result of an analysis sweep over the pending queue
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Number of pending images the detector was run against
    pub analyzed: usize,
    /// Total detections produced across the sweep
    pub detections: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let settings = DetectionSettings::default();
        assert_eq!(settings.classes.len(), 3);
        assert_eq!(settings.classes[0].class_name, "plastic");
        assert_eq!(settings.classes[0].conf, 0.85);
        assert_eq!(settings.rtb.battery_pct, 20);
        assert_eq!(settings.rtb.hold_pct, 80);
    }

    #[test]
    fn test_class_field_serializes_as_class() {
        let settings = DetectionSettings::default();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["classes"][0]["class"], "plastic");
        assert!(value["classes"][0].get("class_name").is_none());
    }
}
