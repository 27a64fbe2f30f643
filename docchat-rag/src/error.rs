//! Error types for the `docchat-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval engine operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while extracting text from a source file.
    #[error("Extraction error ({path}): {message}")]
    ExtractionError {
        /// The file that could not be read.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the RAG pipeline orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),

    /// An error propagated from the chat model.
    #[error(transparent)]
    Model(#[from] docchat_model::ModelError),
}

/// A convenience result type for retrieval engine operations.
pub type Result<T> = std::result::Result<T, RagError>;
