//! Pipeline error taxonomy

use thiserror::Error;

/// Errors raised while parsing or validating a single claim
///
/// Every variant names the offending field so the HTTP layer can return
/// structured per-field errors. All of these surface as a 422; they never
/// reach the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// A required field was absent (or null) after normalization
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A monetary field was not a valid numeric literal
    #[error("field '{field}' is not a valid decimal: '{value}'")]
    InvalidDecimal { field: &'static str, value: String },

    /// A field carried the wrong scalar type
    #[error("field '{field}' has the wrong type, expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// A field failed a structural or business constraint
    #[error("field '{field}' {message}")]
    ConstraintViolation {
        field: &'static str,
        message: String,
    },
}

impl ClaimError {
    /// The field this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ClaimError::MissingField(field) => field,
            ClaimError::InvalidDecimal { field, .. } => field,
            ClaimError::TypeMismatch { field, .. } => field,
            ClaimError::ConstraintViolation { field, .. } => field,
        }
    }

    /// Creates a constraint violation for a field
    pub fn constraint(field: &'static str, message: impl Into<String>) -> Self {
        ClaimError::ConstraintViolation {
            field,
            message: message.into(),
        }
    }
}
