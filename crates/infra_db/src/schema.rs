//! Schema bootstrap
//!
//! The service creates its own table and indexes at startup, mirroring a
//! create-on-boot deployment model. Statements are idempotent so repeated
//! startups are safe. Secondary indexes back the provider aggregation query
//! and future lookups by procedure, group, and subscriber.

use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

const CREATE_CLAIMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS claims (
    id                  BIGSERIAL PRIMARY KEY,
    service_date        DATE NOT NULL,
    submitted_procedure TEXT NOT NULL,
    quadrant            TEXT,
    plan_group_number   TEXT NOT NULL,
    subscriber_number   TEXT NOT NULL,
    provider_npi        TEXT NOT NULL,
    provider_fees       NUMERIC NOT NULL,
    member_coinsurance  NUMERIC NOT NULL,
    member_copay        NUMERIC NOT NULL,
    allowed_fees        NUMERIC NOT NULL,
    net_fee             NUMERIC NOT NULL
)
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_claims_submitted_procedure ON claims (submitted_procedure)",
    "CREATE INDEX IF NOT EXISTS idx_claims_plan_group_number ON claims (plan_group_number)",
    "CREATE INDEX IF NOT EXISTS idx_claims_subscriber_number ON claims (subscriber_number)",
    "CREATE INDEX IF NOT EXISTS idx_claims_provider_npi ON claims (provider_npi)",
];

/// Creates the claims table and its secondary indexes if they do not exist
///
/// # Errors
///
/// Returns `DatabaseError::QueryFailed` if any DDL statement fails
pub async fn ensure_schema(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::query(CREATE_CLAIMS_TABLE).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
