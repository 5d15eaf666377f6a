//! Client error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::secret::SecretError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A secret reference in the configuration could not be resolved.
    #[error("failed to resolve {field}: {source}")]
    Secret {
        field: &'static str,
        #[source]
        source: SecretError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Meetings API error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Output could not be encoded.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server did not create the submitted meeting.
    #[error("meeting not created: {0}")]
    NotCreated(String),

    /// Invalid command-line or form input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Action failed (opening a link).
    #[error("action failed: {0}")]
    Action(String),
}

impl ClientError {
    pub fn secret(field: &'static str, source: SecretError) -> Self {
        Self::Secret { field, source }
    }
}
