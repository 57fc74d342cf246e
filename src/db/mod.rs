//! Database connection and schema management for SkySweep
//!
//! This module handles SQLite connection pooling and first-run schema creation.
//! Entities keep their nested sub-documents (classification, human review,
//! bounding boxes, assignments) as JSON text columns.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to initialize schema: {0}")]
    SchemaError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create a database connection pool
pub async fn create_pool(config: &Config) -> Result<SqlitePool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DbError::InvalidUrl(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Create tables and indexes if they do not exist yet
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Initializing database schema...");

    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            email TEXT UNIQUE,
            role_id TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            start_date TEXT,
            end_date TEXT,
            hashed_password TEXT NOT NULL,
            last_login TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS roles (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            permissions TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS drones (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            model TEXT NOT NULL,
            base_assigned TEXT NOT NULL,
            route_assigned TEXT,
            status TEXT NOT NULL,
            battery_pct INTEGER NOT NULL,
            payload_capacity_grams INTEGER NOT NULL,
            camera_status TEXT NOT NULL,
            signal_status TEXT NOT NULL,
            last_maintenance_at TEXT,
            missions_completed INTEGER NOT NULL,
            litter_collected INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS bases (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            servicing_address TEXT NOT NULL,
            what3words TEXT NOT NULL,
            drones_assigned TEXT NOT NULL,
            routes_assigned TEXT NOT NULL,
            litter_capacity_pct INTEGER NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS routes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            distance TEXT NOT NULL,
            base_assigned TEXT NOT NULL,
            drone_assigned TEXT,
            mission_frequency TEXT NOT NULL,
            litter_capacity TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS litter_images (
            id TEXT PRIMARY KEY,
            mission_id TEXT NOT NULL,
            drone_id TEXT NOT NULL,
            image_url TEXT NOT NULL,
            local_path TEXT NOT NULL,
            original_filename TEXT NOT NULL,
            captured_at TEXT NOT NULL,
            location TEXT NOT NULL,
            classification TEXT NOT NULL,
            review_status TEXT NOT NULL,
            bounding_boxes TEXT NOT NULL,
            human_review TEXT NOT NULL,
            vacuum TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS detection_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            config TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_litter_images_mission
        ON litter_images(mission_id)
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_litter_images_status
        ON litter_images(review_status)
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_litter_images_label
        ON litter_images(json_extract(classification, '$.label'))
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DbError::SchemaError(e.to_string()))?;
    }

    tracing::info!("Database schema initialized successfully");

    Ok(())
}

/// Check database connectivity (for health checks)
pub async fn check_health(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_initialization_is_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_schema(&pool).await.unwrap();
        initialize_schema(&pool).await.unwrap();

        check_health(&pool).await.unwrap();
    }
}
