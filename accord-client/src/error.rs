//! Error types for the client layer.

use accord_model::ModelError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by managers and the REST transport.
///
/// The dispatch path never returns these; handler failures become debug
/// events instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A response payload could not be decoded into an entity.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// A caller-supplied argument was unusable.
    #[error("validation error: {0}")]
    Validation(String),

    /// No application id is known yet: neither configured nor learned from READY.
    #[error("application id is not known")]
    MissingApplication,
}

impl ClientError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}
