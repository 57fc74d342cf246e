//! SkySweep Backend Server
//!
//! Operations backend for the drone litter collection platform: fleet,
//! base and patrol route management plus the AI litter review workflow.

use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use skysweep_server::config::Config;
use skysweep_server::state::AppState;
use skysweep_server::{db, routes, seed};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    // Database pool and first-run schema
    let db_pool = match db::create_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to set up database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::initialize_schema(&db_pool).await {
        tracing::error!("Failed to initialize database schema: {}", e);
        std::process::exit(1);
    }

    // Uploads are written here before their records exist
    if let Err(e) = tokio::fs::create_dir_all(&config.storage_dir).await {
        tracing::error!(
            "Failed to create storage directory {}: {}",
            config.storage_dir,
            e
        );
        std::process::exit(1);
    }

    if let Err(e) = seed::run(&db_pool, &config).await {
        tracing::error!("Failed to seed database: {}", e);
        std::process::exit(1);
    }

    let cors = configure_cors(&config);
    let port = config.port;

    let state = AppState::new(db_pool, Arc::new(config));
    let app = routes::build_router(state).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

fn configure_cors(config: &Config) -> CorsLayer {
    let allowed_origins = config.cors_allowed_origins.clone().unwrap_or_default();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
