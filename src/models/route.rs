//! Patrol route models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored patrol route record
///
/// Distance and litter capacity stay free-form display strings
/// ("750m", "15 litres"), matching how operators enter them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PatrolRoute {
    pub id: String,
    pub name: String,
    pub distance: String,
    pub base_assigned: String,
    pub drone_assigned: Option<String>,
    pub mission_frequency: String,
    pub litter_capacity: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(min = 1))]
    pub distance: String,

    #[validate(length(min = 1))]
    pub base_assigned: String,

    pub drone_assigned: Option<String>,

    /// Defaults to Daily
    pub mission_frequency: Option<String>,

    /// Defaults to "15 litres"
    pub litter_capacity: Option<String>,

    /// Defaults to Active
    pub status: Option<String>,
}

/// Partial update; absent and null fields are both left unchanged
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    pub distance: Option<String>,
    pub base_assigned: Option<String>,
    pub drone_assigned: Option<String>,
    pub mission_frequency: Option<String>,
    pub litter_capacity: Option<String>,
    pub status: Option<String>,
}
