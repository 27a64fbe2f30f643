//! Configuration for the RAG pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default chunk size used when ingesting documents, in characters.
///
/// Deliberately smaller than the chunker's generic
/// [`DEFAULT_CHUNK_SIZE`](crate::DEFAULT_CHUNK_SIZE) of 1000: ingestion
/// favors tighter chunks for retrieval precision.
pub const DEFAULT_INGEST_CHUNK_SIZE: usize = 800;

/// Default number of chunks retrieved to ground a query.
pub const DEFAULT_QUERY_TOP_K: usize = 3;

/// Configuration parameters for the RAG pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters used during ingestion.
    pub chunk_size: usize,
    /// Number of top results retrieved from vector search per query.
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_INGEST_CHUNK_SIZE, top_k: DEFAULT_QUERY_TOP_K }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum ingestion chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the number of top results retrieved from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`RagConfig`], validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `chunk_size == 0` or `top_k == 0`.
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::ConfigError("chunk_size must be greater than zero".to_string()));
        }
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
