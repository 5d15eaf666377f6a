//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding API bodies.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Body is not valid JSON, or a value has the wrong type.
    #[error("invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Body is valid JSON but not in a shape the client understands.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
