//! Claims DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use claims_core::RawClaim;
use infra_db::ProviderNetFeeRow;

/// Ingestion payload: a single raw claim object or an array of them
///
/// Clients submit either shape to `POST /claims`; both are processed as a
/// batch (of one, in the single case) with all-or-nothing semantics.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClaimsPayload {
    Batch(Vec<RawClaim>),
    Single(RawClaim),
}

impl ClaimsPayload {
    /// Flattens the payload into an ordered list of raw claims
    pub fn into_items(self) -> Vec<RawClaim> {
        match self {
            ClaimsPayload::Batch(items) => items,
            ClaimsPayload::Single(item) => vec![item],
        }
    }
}

/// One provider with its total net fee, for the reporting endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ProviderNetFee {
    pub provider_npi: String,
    pub total_net_fee: Decimal,
}

impl From<ProviderNetFeeRow> for ProviderNetFee {
    fn from(row: ProviderNetFeeRow) -> Self {
        Self {
            provider_npi: row.provider_npi,
            total_net_fee: row.total_net_fee,
        }
    }
}
