//! Claim types and net fee derivation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The service date as it stands after lenient parsing
///
/// A string that fails the lenient date parse is carried through verbatim
/// rather than rejected; the validator turns it into a type mismatch. This
/// two-phase laxity is deliberate: normalization never raises on bad dates,
/// strict rejection happens only at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceDate {
    /// Successfully parsed calendar date
    Parsed(NaiveDate),
    /// Original text that did not parse as a date
    Unparsed(String),
}

impl ServiceDate {
    /// The parsed date, if the lenient parse succeeded
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ServiceDate::Parsed(date) => Some(*date),
            ServiceDate::Unparsed(_) => None,
        }
    }
}

/// A claim with typed fields, prior to constraint validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClaim {
    pub service_date: ServiceDate,
    pub submitted_procedure: String,
    pub quadrant: Option<String>,
    pub plan_group_number: String,
    pub subscriber_number: String,
    pub provider_npi: String,
    pub provider_fees: Decimal,
    pub member_coinsurance: Decimal,
    pub member_copay: Decimal,
    pub allowed_fees: Decimal,
}

/// A claim that passed every structural and business constraint
///
/// Identical to [`ParsedClaim`] except the service date is now a concrete
/// calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedClaim {
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
}

impl ValidatedClaim {
    /// Derives the net fee from the validated monetary fields
    pub fn net_fee(&self) -> Decimal {
        net_fee(
            self.provider_fees,
            self.member_coinsurance,
            self.member_copay,
            self.allowed_fees,
        )
    }
}

/// A persisted claim with its system-assigned identifier and derived net fee
///
/// Claims are immutable after creation; `net_fee` is computed exactly once
/// and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
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

/// Net fee formula: `provider_fees + member_coinsurance + member_copay - allowed_fees`
///
/// Exact decimal arithmetic; the result may be negative and carries no
/// rounding beyond what the four inputs already had.
pub fn net_fee(
    provider_fees: Decimal,
    member_coinsurance: Decimal,
    member_copay: Decimal,
    allowed_fees: Decimal,
) -> Decimal {
    provider_fees + member_coinsurance + member_copay - allowed_fees
}
