//! Base station models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

/// Stored base station record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BaseStation {
    pub id: String,
    pub name: String,
    pub servicing_address: String,
    /// what3words geocode token, e.g. `///track.rapid.giant`
    pub what3words: String,
    pub drones_assigned: Json<Vec<String>>,
    pub routes_assigned: Json<Vec<String>>,
    pub litter_capacity_pct: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateBaseRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(min = 1))]
    pub servicing_address: String,

    #[validate(length(min = 1))]
    pub what3words: String,

    #[serde(default)]
    pub drones_assigned: Vec<String>,

    #[serde(default)]
    pub routes_assigned: Vec<String>,

    pub litter_capacity_pct: Option<i64>,
    pub status: Option<String>,
}

/// Partial update; absent and null fields are both left unchanged
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateBaseRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    pub servicing_address: Option<String>,
    pub what3words: Option<String>,
    pub drones_assigned: Option<Vec<String>>,
    pub routes_assigned: Option<Vec<String>>,
    pub litter_capacity_pct: Option<i64>,
    pub status: Option<String>,
}
