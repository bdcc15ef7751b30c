//! HTTP API Layer
//!
//! This crate provides the REST API for the dental claims service using Axum.
//!
//! # Endpoints
//!
//! - `POST /claims` - ingest one claim or a batch (all-or-nothing)
//! - `GET /claims` - list all claims
//! - `GET /claims/:id` - fetch one claim
//! - `GET /top-provider-npis` - rate-limited top-10 providers by net fee
//! - `GET /health` - liveness probe
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, rate_limit::RateLimiter};
//!
//! let app = create_router(pool, rate_limiter);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod rate_limit;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{claims, health, providers};
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use infra_db::ClaimsRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: ClaimsRepository,
    pub rate_limiter: RateLimiter,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `rate_limiter` - Counter-store-backed rate limiter handle
pub fn create_router(pool: PgPool, rate_limiter: RateLimiter) -> Router {
    let state = AppState {
        repository: ClaimsRepository::new(pool),
        rate_limiter,
    };

    // Claim ingestion and reads
    let claim_routes = Router::new()
        .route("/claims", get(claims::list_claims).post(claims::create_claims))
        .route("/claims/:id", get(claims::get_claim));

    // Reporting sits behind the sliding-window rate limiter
    let reporting_routes = Router::new()
        .route("/top-provider-npis", get(providers::top_provider_npis))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(claim_routes)
        .merge(reporting_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
