//! First-run data seeding
//!
//! Populates an empty database with the default roles, the admin account
//! and the detection settings. Existing data is never touched, so running
//! the seed on every boot is safe.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{new_id, DetectionSettings};
use crate::services::hash_password;

pub async fn run(pool: &SqlitePool, config: &Config) -> Result<(), ApiError> {
    seed_roles(pool).await?;
    seed_admin_user(pool, config).await?;
    seed_detection_settings(pool).await?;

    Ok(())
}

async fn seed_roles(pool: &SqlitePool) -> Result<(), ApiError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let defaults = [
        ("Admin", "Full system access", vec!["all"]),
        (
            "Operator",
            "Drone and user management access",
            vec!["drones:read", "users:read", "users:write"],
        ),
        ("Review", "AI queue review access", vec!["ai:review"]),
    ];

    let now = Utc::now();
    for (name, description, permissions) in defaults {
        sqlx::query(
            r#"
            INSERT INTO roles (id, name, description, permissions, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new_id("R_"))
        .bind(name)
        .bind(description)
        .bind(Json(permissions))
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;
    }

    tracing::info!("Seeded default roles");

    Ok(())
}

async fn seed_admin_user(pool: &SqlitePool, config: &Config) -> Result<(), ApiError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let role_id: Option<String> = sqlx::query_scalar("SELECT id FROM roles WHERE name = ?")
        .bind("Admin")
        .fetch_optional(pool)
        .await?;
    let role_id = role_id
        .ok_or_else(|| ApiError::InternalError("Admin role missing after seeding".to_string()))?;

    let hashed_password = hash_password(&config.seed_admin_password)?;
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (
            id, username, name, email, role_id, is_active,
            start_date, end_date, hashed_password, last_login,
            created_at, updated_at
        )
        VALUES (?, ?, ?, NULL, ?, 1, NULL, NULL, ?, NULL, ?, ?)
        "#,
    )
    .bind(new_id("U_"))
    .bind("admin")
    .bind("Admin")
    .bind(&role_id)
    .bind(hashed_password)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    tracing::info!("Seeded admin user");

    Ok(())
}

async fn seed_detection_settings(pool: &SqlitePool) -> Result<(), ApiError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM detection_settings")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    sqlx::query("INSERT INTO detection_settings (id, config, updated_at) VALUES (1, ?, ?)")
        .bind(Json(DetectionSettings::default()))
        .bind(Utc::now())
        .execute(pool)
        .await?;

    tracing::info!("Seeded detection settings");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::db::initialize_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_schema(&pool).await.unwrap();
        let config = test_config();

        run(&pool, &config).await.unwrap();
        run(&pool, &config).await.unwrap();

        let roles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(roles, 3);

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 1);

        let settings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM detection_settings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(settings, 1);
    }

    #[tokio::test]
    async fn test_seed_skips_populated_database() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_schema(&pool).await.unwrap();
        let config = test_config();

        run(&pool, &config).await.unwrap();

        let admin_id: String = sqlx::query_scalar("SELECT id FROM users WHERE username = 'admin'")
            .fetch_one(&pool)
            .await
            .unwrap();

        run(&pool, &config).await.unwrap();

        let admin_id_after: String =
            sqlx::query_scalar("SELECT id FROM users WHERE username = 'admin'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(admin_id, admin_id_after);
    }
}
