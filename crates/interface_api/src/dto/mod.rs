//! Request/response data transfer objects

pub mod claims;

pub use claims::{ClaimsPayload, ProviderNetFee};
