//! Drone models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored drone record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Drone {
    pub id: String,
    pub name: String,
    pub model: String,
    pub base_assigned: String,
    pub route_assigned: Option<String>,
    pub status: String,
    pub battery_pct: i64,
    pub payload_capacity_grams: i64,
    pub camera_status: String,
    pub signal_status: String,
    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub missions_completed: i64,
    pub litter_collected: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateDroneRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(min = 1, max = 128))]
    pub model: String,

    #[validate(length(min = 1))]
    pub base_assigned: String,

    pub route_assigned: Option<String>,

    /// New drones default to Inactive until commissioned
    pub status: Option<String>,
    pub battery_pct: Option<i64>,
    pub payload_capacity_grams: Option<i64>,
    pub camera_status: Option<String>,
    pub signal_status: Option<String>,
}

/// Partial update; absent and null fields are both left unchanged
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateDroneRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub model: Option<String>,

    pub base_assigned: Option<String>,
    pub route_assigned: Option<String>,
    pub status: Option<String>,
    pub battery_pct: Option<i64>,
    pub payload_capacity_grams: Option<i64>,
    pub camera_status: Option<String>,
    pub signal_status: Option<String>,
    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub missions_completed: Option<i64>,
    pub litter_collected: Option<i64>,
}
