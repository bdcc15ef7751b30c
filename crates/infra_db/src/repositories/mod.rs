//! Repository implementations

pub mod claims;
