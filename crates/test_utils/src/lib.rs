//! Test Utilities
//!
//! Shared helpers for the claims service test suite. The central piece is
//! [`RawClaimBuilder`], which produces raw claim payloads with sensible
//! defaults so tests only spell out the fields they care about.

pub mod builders;

pub use builders::RawClaimBuilder;
