//! Claims handlers
//!
//! `create_claims` is the ingestion orchestrator: every element of the
//! payload runs the normalize → parse → validate pipeline before anything
//! touches storage, so a single bad element rejects the whole batch with a
//! 422 and zero persisted claims. Accepted batches insert in input order
//! inside one transaction.

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use claims_core::{normalize_claim, parse_claim, validate, Claim};
use infra_db::NewClaim;

use crate::dto::ClaimsPayload;
use crate::error::ApiError;
use crate::AppState;

/// Creates one claim or a batch of claims
pub async fn create_claims(
    State(state): State<AppState>,
    Json(payload): Json<ClaimsPayload>,
) -> Result<Json<Vec<Claim>>, ApiError> {
    let items = payload.into_items();

    // Run the whole pipeline for every element before the first insert
    let mut new_claims = Vec::with_capacity(items.len());
    for raw in &items {
        let normalized = normalize_claim(raw);
        let parsed = parse_claim(&normalized)?;
        let validated = validate(parsed).map_err(ApiError::from)?;
        new_claims.push(NewClaim::from(validated));
    }

    let rows = state.repository.insert_batch(&new_claims).await?;
    let created: Vec<Claim> = rows.into_iter().map(Claim::from).collect();

    info!(count = created.len(), "Claims created");
    Ok(Json(created))
}

/// Lists all claims in insertion order
pub async fn list_claims(State(state): State<AppState>) -> Result<Json<Vec<Claim>>, ApiError> {
    let rows = state.repository.list_all().await?;
    Ok(Json(rows.into_iter().map(Claim::from).collect()))
}

/// Gets a claim by its identifier
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Claim>, ApiError> {
    let row = state.repository.get_by_id(id).await?;
    Ok(Json(Claim::from(row)))
}
