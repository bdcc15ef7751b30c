//! Claims repository implementation
//!
//! Database access for claim records: batch insertion inside a single
//! transaction, lookups by id, full listing, and the top-provider net fee
//! aggregation. Claims are immutable after creation, so there are no
//! update or delete operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, instrument};

use claims_core::{Claim, ValidatedClaim};

use crate::error::DatabaseError;

/// Repository for claim records
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a batch of claims inside one transaction, in input order
    ///
    /// The transaction commits only after every claim inserts successfully;
    /// any failure (including a uniqueness conflict on one element) rolls
    /// the whole batch back, so no partial success is ever exposed.
    ///
    /// # Arguments
    ///
    /// * `claims` - The claims to insert, in the order they were submitted
    ///
    /// # Returns
    ///
    /// The created rows with assigned identifiers, in input order
    #[instrument(skip_all, fields(batch_size = claims.len()))]
    pub async fn insert_batch(&self, claims: &[NewClaim]) -> Result<Vec<ClaimRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(claims.len());

        for claim in claims {
            let row = sqlx::query_as::<_, ClaimRow>(
                r#"
                INSERT INTO claims (
                    service_date, submitted_procedure, quadrant,
                    plan_group_number, subscriber_number, provider_npi,
                    provider_fees, member_coinsurance, member_copay,
                    allowed_fees, net_fee
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING
                    id, service_date, submitted_procedure, quadrant,
                    plan_group_number, subscriber_number, provider_npi,
                    provider_fees, member_coinsurance, member_copay,
                    allowed_fees, net_fee
                "#,
            )
            .bind(claim.service_date)
            .bind(&claim.submitted_procedure)
            .bind(&claim.quadrant)
            .bind(&claim.plan_group_number)
            .bind(&claim.subscriber_number)
            .bind(&claim.provider_npi)
            .bind(claim.provider_fees)
            .bind(claim.member_coinsurance)
            .bind(claim.member_copay)
            .bind(claim.allowed_fees)
            .bind(claim.net_fee)
            .fetch_one(&mut *tx)
            .await?;

            created.push(row);
        }

        tx.commit().await?;
        info!(count = created.len(), "Claim batch persisted");
        Ok(created)
    }

    /// Retrieves a claim by its identifier
    ///
    /// # Returns
    ///
    /// The claim row or a NotFound error
    pub async fn get_by_id(&self, id: i64) -> Result<ClaimRow, DatabaseError> {
        sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT
                id, service_date, submitted_procedure, quadrant,
                plan_group_number, subscriber_number, provider_npi,
                provider_fees, member_coinsurance, member_copay,
                allowed_fees, net_fee
            FROM claims
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Retrieves all claims in insertion (id) order
    pub async fn list_all(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT
                id, service_date, submitted_procedure, quadrant,
                plan_group_number, subscriber_number, provider_npi,
                provider_fees, member_coinsurance, member_copay,
                allowed_fees, net_fee
            FROM claims
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Groups claims by provider and sums net fees, highest total first
    ///
    /// Summation happens in the database as exact NUMERIC arithmetic.
    /// Ties between providers with equal totals come back in whatever
    /// order PostgreSQL produces (implementation-defined).
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of providers to return
    pub async fn top_providers(&self, limit: i64) -> Result<Vec<ProviderNetFeeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProviderNetFeeRow>(
            r#"
            SELECT provider_npi, SUM(net_fee) AS total_net_fee
            FROM claims
            GROUP BY provider_npi
            ORDER BY SUM(net_fee) DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Data for inserting a new claim: validated fields plus the derived net fee
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub service_date: NaiveDate,
    pub submitted_procedure: String,
    pub quadrant: Option<String>,
    pub plan_group_number: String,
    pub subscriber_number: String,
    pub provider_npi: String,
    pub provider_fees: Decimal,
    pub member_coinsurance: Decimal,
    pub member_copay: Decimal,
    pub allowed_fees: Decimal,
    pub net_fee: Decimal,
}

impl From<ValidatedClaim> for NewClaim {
    /// Builds the insertable record, computing the net fee exactly once
    fn from(claim: ValidatedClaim) -> Self {
        let net_fee = claim.net_fee();
        Self {
            service_date: claim.service_date,
            submitted_procedure: claim.submitted_procedure,
            quadrant: claim.quadrant,
            plan_group_number: claim.plan_group_number,
            subscriber_number: claim.subscriber_number,
            provider_npi: claim.provider_npi,
            provider_fees: claim.provider_fees,
            member_coinsurance: claim.member_coinsurance,
            member_copay: claim.member_copay,
            allowed_fees: claim.allowed_fees,
            net_fee,
        }
    }
}

/// Database row for a persisted claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub service_date: NaiveDate,
    pub submitted_procedure: String,
    pub quadrant: Option<String>,
    pub plan_group_number: String,
    pub subscriber_number: String,
    pub provider_npi: String,
    pub provider_fees: Decimal,
    pub member_coinsurance: Decimal,
    pub member_copay: Decimal,
    pub allowed_fees: Decimal,
    pub net_fee: Decimal,
}

impl From<ClaimRow> for Claim {
    fn from(row: ClaimRow) -> Self {
        Claim {
            id: row.id,
            service_date: row.service_date,
            submitted_procedure: row.submitted_procedure,
            quadrant: row.quadrant,
            plan_group_number: row.plan_group_number,
            subscriber_number: row.subscriber_number,
            provider_npi: row.provider_npi,
            provider_fees: row.provider_fees,
            member_coinsurance: row.member_coinsurance,
            member_copay: row.member_copay,
            allowed_fees: row.allowed_fees,
            net_fee: row.net_fee,
        }
    }
}

/// Aggregation row: one provider with its summed net fee
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProviderNetFeeRow {
    pub provider_npi: String,
    pub total_net_fee: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn validated() -> ValidatedClaim {
        ValidatedClaim {
            service_date: NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
            submitted_procedure: "D1234".to_string(),
            quadrant: Some("UR".to_string()),
            plan_group_number: "ABC123".to_string(),
            subscriber_number: "SUB123456".to_string(),
            provider_npi: "1234567890".to_string(),
            provider_fees: dec!(100.00),
            member_coinsurance: dec!(20.00),
            member_copay: dec!(10.00),
            allowed_fees: dec!(50.00),
        }
    }

    #[test]
    fn new_claim_carries_the_derived_net_fee() {
        let new_claim = NewClaim::from(validated());
        assert_eq!(new_claim.net_fee, dec!(80.00));
    }
}
