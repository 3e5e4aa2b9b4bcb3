//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while decoding payloads or misusing builders.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field could not be decoded into its declared type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A payload was not a JSON object.
    #[error("expected a JSON object for {0}")]
    NotAnObject(&'static str),

    /// A field every payload of this kind must carry was absent or null.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A discriminant did not name a known variant.
    #[error("invalid type for {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    /// A builder or setter received a value outside its allowed range.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl ModelError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
