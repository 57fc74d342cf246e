//! Role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

/// Stored role record; permissions are opaque capability strings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Partial update; absent and null fields are both left unchanged
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}
