//! Claims Core - normalization, parsing, and validation for dental claims
//!
//! This crate implements the ingestion pipeline that turns arbitrarily
//! formatted client payloads into strongly typed claim records:
//!
//! 1. **Normalize** raw keys and values ([`normalize::normalize_claim`])
//! 2. **Parse** the normalized map into typed fields ([`parse::parse_claim`])
//! 3. **Validate** structural and business constraints ([`validate::validate`])
//! 4. **Derive** the net fee ([`claim::net_fee`])
//!
//! Persistence and HTTP concerns live in `infra_db` and `interface_api`.

pub mod claim;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod validate;
pub mod value;

pub use claim::{net_fee, Claim, ParsedClaim, ServiceDate, ValidatedClaim};
pub use error::ClaimError;
pub use normalize::{normalize_claim, normalize_key, normalize_value, NormalizedClaim};
pub use parse::parse_claim;
pub use validate::validate;
pub use value::{ClaimValue, RawClaim};
