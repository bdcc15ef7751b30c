//! Provider reporting handlers

use axum::extract::State;
use axum::Json;

use crate::dto::ProviderNetFee;
use crate::error::ApiError;
use crate::AppState;

/// Providers returned by the top-providers report
const TOP_PROVIDER_LIMIT: i64 = 10;

/// Returns up to 10 providers ordered by total net fee, highest first
///
/// The aggregate is recomputed on every call; nothing is cached.
pub async fn top_provider_npis(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProviderNetFee>>, ApiError> {
    let rows = state.repository.top_providers(TOP_PROVIDER_LIMIT).await?;
    Ok(Json(rows.into_iter().map(ProviderNetFee::from).collect()))
}
