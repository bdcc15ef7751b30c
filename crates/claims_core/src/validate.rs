//! Structural and business constraint validation
//!
//! Violations are collected rather than fail-fast, in field declaration
//! order, so a single 422 response can describe every problem with a claim.

use rust_decimal::Decimal;

use crate::claim::{ParsedClaim, ServiceDate, ValidatedClaim};
use crate::error::ClaimError;

/// NPI length mandated by the NPI standard
const NPI_DIGITS: usize = 10;

/// Maximum fractional digits for monetary fields
const MONEY_SCALE: u32 = 2;

/// Validates a parsed claim against every field constraint
///
/// Checks run in field declaration order: service date type, procedure code
/// prefix, group/subscriber presence, NPI pattern, then each monetary
/// field's non-negativity and decimal precision. A claim whose service date
/// survived parsing as raw text fails here with a type mismatch, which is
/// what rejects malformed dates end-to-end.
pub fn validate(parsed: ParsedClaim) -> Result<ValidatedClaim, Vec<ClaimError>> {
    let mut violations = Vec::new();

    let service_date = match &parsed.service_date {
        ServiceDate::Parsed(date) => Some(*date),
        ServiceDate::Unparsed(_) => {
            violations.push(ClaimError::TypeMismatch {
                field: "service_date",
                expected: "date",
            });
            None
        }
    };

    if !parsed.submitted_procedure.starts_with('D') {
        violations.push(ClaimError::constraint(
            "submitted_procedure",
            "must start with 'D'",
        ));
    }

    if parsed.plan_group_number.is_empty() {
        violations.push(ClaimError::constraint(
            "plan_group_number",
            "must not be empty",
        ));
    }

    if parsed.subscriber_number.is_empty() {
        violations.push(ClaimError::constraint(
            "subscriber_number",
            "must not be empty",
        ));
    }

    if !is_valid_npi(&parsed.provider_npi) {
        violations.push(ClaimError::constraint(
            "provider_npi",
            "must be exactly 10 digits",
        ));
    }

    let monetary_fields = [
        ("provider_fees", parsed.provider_fees),
        ("member_coinsurance", parsed.member_coinsurance),
        ("member_copay", parsed.member_copay),
        ("allowed_fees", parsed.allowed_fees),
    ];
    for (field, amount) in monetary_fields {
        if amount < Decimal::ZERO {
            violations.push(ClaimError::constraint(field, "must be non-negative"));
        }
        if amount.scale() > MONEY_SCALE {
            violations.push(ClaimError::constraint(
                field,
                "must have at most 2 decimal places",
            ));
        }
    }

    match service_date {
        Some(service_date) if violations.is_empty() => Ok(ValidatedClaim {
            service_date,
            submitted_procedure: parsed.submitted_procedure,
            quadrant: parsed.quadrant,
            plan_group_number: parsed.plan_group_number,
            subscriber_number: parsed.subscriber_number,
            provider_npi: parsed.provider_npi,
            provider_fees: parsed.provider_fees,
            member_coinsurance: parsed.member_coinsurance,
            member_copay: parsed.member_copay,
            allowed_fees: parsed.allowed_fees,
        }),
        _ => Err(violations),
    }
}

/// Exactly 10 ASCII digits
fn is_valid_npi(npi: &str) -> bool {
    npi.len() == NPI_DIGITS && npi.bytes().all(|b| b.is_ascii_digit())
}
