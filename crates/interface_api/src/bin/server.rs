//! Dental Claims Service - API Server Binary
//!
//! Starts the HTTP API server for claim ingestion and reporting.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-api
//!
//! # Run with environment variables
//! DATABASE_URL=postgres://... REDIS_HOST=localhost cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `HOST` - Server host (default: 0.0.0.0)
//! * `PORT` - Server port (default: 8080)
//! * `DATABASE_URL` - PostgreSQL connection string
//! * `REDIS_HOST` / `REDIS_PORT` - Rate-limit counter store
//! * `RATE_LIMIT_TIMES` - Requests per window (default: 10)
//! * `RATE_LIMIT_SECONDS` - Window length (default: 60)
//! * `LOG_LEVEL` - trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router, rate_limit::RateLimiter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, bootstraps the schema,
/// connects the rate-limit counter store, and serves until shutdown.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting dental claims API server"
    );

    // Database pool and schema bootstrap
    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("failed to connect to database")?;
    infra_db::ensure_schema(&pool)
        .await
        .context("failed to bootstrap schema")?;

    // Counter store for the sliding-window rate limiter; the handle is torn
    // down when the server task finishes
    let rate_limiter = RateLimiter::connect(
        &config.redis_url(),
        config.rate_limit_times,
        config.rate_limit_window(),
    )
    .await
    .context("failed to connect to counter store")?;

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_router(pool.clone(), rate_limiter);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Enables graceful shutdown so in-flight requests complete before the
/// process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
