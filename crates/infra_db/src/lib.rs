//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL access for the claims service using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: handlers talk to
//! [`ClaimsRepository`], which hides connection pooling, transactions, and
//! SQL details from the HTTP layer. Queries are runtime-checked
//! (`sqlx::query_as`) so the workspace builds without a live database.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, ClaimsRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! infra_db::ensure_schema(&pool).await?;
//! let repo = ClaimsRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;
pub mod schema;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::claims::{ClaimRow, ClaimsRepository, NewClaim, ProviderNetFeeRow};
pub use schema::ensure_schema;
