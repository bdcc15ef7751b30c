//! Typed field extraction from a normalized claim
//!
//! Everything here operates on canonical keys produced by
//! [`crate::normalize`]. Two failure policies apply, per field class:
//!
//! - monetary fields are strict: a malformed numeric literal is fatal for
//!   the whole claim (`InvalidDecimal`)
//! - the service date is lenient: a string that fails the free-form date
//!   parse is carried through as [`ServiceDate::Unparsed`] and rejected
//!   later by the validator

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::claim::{ParsedClaim, ServiceDate};
use crate::error::ClaimError;
use crate::normalize::NormalizedClaim;
use crate::value::ClaimValue;

/// Date-only formats tried by the lenient parse, most common first
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%Y%m%d",
];

/// Date-time formats accepted and truncated to their date component
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Attempts a lenient free-form date parse
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Converts a normalized claim into typed fields
///
/// Required fields: `service_date`, the four monetary fields, and the
/// identifier strings. Missing (or null) required fields fail with
/// `MissingField`; a number where a string is expected fails with
/// `TypeMismatch`. The first error encountered aborts the claim.
pub fn parse_claim(normalized: &NormalizedClaim) -> Result<ParsedClaim, ClaimError> {
    let service_date = match normalized.get("service_date") {
        None | Some(ClaimValue::Null) => return Err(ClaimError::MissingField("service_date")),
        Some(ClaimValue::String(raw)) => match parse_service_date(raw) {
            Some(date) => ServiceDate::Parsed(date),
            // Lenient pass-through: the validator rejects this later
            None => ServiceDate::Unparsed(raw.clone()),
        },
        Some(ClaimValue::Number(n)) => ServiceDate::Unparsed(n.to_string()),
    };

    Ok(ParsedClaim {
        service_date,
        submitted_procedure: required_string(normalized, "submitted_procedure")?,
        quadrant: optional_string(normalized, "quadrant")?,
        plan_group_number: required_string(normalized, "plan_group_number")?,
        subscriber_number: required_string(normalized, "subscriber_number")?,
        provider_npi: required_string(normalized, "provider_npi")?,
        provider_fees: required_decimal(normalized, "provider_fees")?,
        member_coinsurance: required_decimal(normalized, "member_coinsurance")?,
        member_copay: required_decimal(normalized, "member_copay")?,
        allowed_fees: required_decimal(normalized, "allowed_fees")?,
    })
}

fn required_string(
    normalized: &NormalizedClaim,
    field: &'static str,
) -> Result<String, ClaimError> {
    match normalized.get(field) {
        None | Some(ClaimValue::Null) => Err(ClaimError::MissingField(field)),
        Some(ClaimValue::String(s)) => Ok(s.clone()),
        Some(ClaimValue::Number(_)) => Err(ClaimError::TypeMismatch {
            field,
            expected: "string",
        }),
    }
}

fn optional_string(
    normalized: &NormalizedClaim,
    field: &'static str,
) -> Result<Option<String>, ClaimError> {
    match normalized.get(field) {
        None | Some(ClaimValue::Null) => Ok(None),
        Some(ClaimValue::String(s)) => Ok(Some(s.clone())),
        Some(ClaimValue::Number(_)) => Err(ClaimError::TypeMismatch {
            field,
            expected: "string",
        }),
    }
}

fn required_decimal(
    normalized: &NormalizedClaim,
    field: &'static str,
) -> Result<Decimal, ClaimError> {
    let literal = match normalized.get(field) {
        None | Some(ClaimValue::Null) => return Err(ClaimError::MissingField(field)),
        Some(ClaimValue::Number(n)) => n.to_string(),
        Some(ClaimValue::String(s)) => s.clone(),
    };

    parse_decimal(&literal).ok_or_else(|| ClaimError::InvalidDecimal {
        field,
        value: literal,
    })
}

/// Parses an exact decimal from its literal text, accepting scientific
/// notation the way JSON numbers may carry it
fn parse_decimal(literal: &str) -> Option<Decimal> {
    Decimal::from_str(literal)
        .ok()
        .or_else(|| Decimal::from_scientific(literal).ok())
}
