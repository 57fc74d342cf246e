//! Shared helpers for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use skysweep_server::config::{Config, Environment};
use skysweep_server::routes::build_router;
use skysweep_server::state::AppState;
use skysweep_server::{db, seed};

pub struct TestContext {
    pub server: TestServer,
    pub pool: SqlitePool,
}

/// Stand up a seeded server against a fresh in-memory database.
///
/// Uploads are written to a per-test temp directory so parallel tests
/// never collide on disk.
pub async fn spawn() -> TestContext {
    let storage_dir =
        std::env::temp_dir().join(format!("skysweep-test-{}", uuid::Uuid::new_v4().simple()));
    tokio::fs::create_dir_all(&storage_dir).await.unwrap();

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        environment: Environment::Development,
        port: 0,
        db_max_connections: 1,
        public_base_url: "http://127.0.0.1:8001".to_string(),
        storage_dir: storage_dir.to_string_lossy().into_owned(),
        cors_allowed_origins: None,
        log_level: "warn".to_string(),
        jwt_secret: "test-secret".to_string(),
        session_ttl_seconds: 3600,
        seed_admin_password: "Testing123".to_string(),
    };

    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::initialize_schema(&pool).await.unwrap();
    seed::run(&pool, &config).await.unwrap();

    let state = AppState::new(pool.clone(), Arc::new(config));
    let server = TestServer::new(build_router(state)).unwrap();

    TestContext { server, pool }
}

/// Log in as the seeded admin and return the session token
pub async fn login_admin(server: &TestServer) -> String {
    let response = server
        .post("/login")
        .json(&json!({
            "username_or_email": "admin",
            "password": "Testing123"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().unwrap().to_string()
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}
