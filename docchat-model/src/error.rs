//! Error types for the `docchat-model` crate.

use thiserror::Error;

/// Errors that can occur when talking to a chat model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend request failed (transport, auth, rate limit, ...).
    #[error("Chat model error ({provider}): {message}")]
    RequestFailed {
        /// The backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The backend returned a response that could not be interpreted.
    #[error("Chat model returned an unusable response ({provider}): {message}")]
    InvalidResponse {
        /// The backend that produced the response.
        provider: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A configuration validation error.
    #[error("Chat model configuration error: {0}")]
    Config(String),
}

/// A convenience result type for chat model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
