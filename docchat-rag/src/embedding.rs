//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap an external embedding backend behind a unified async
/// interface and are expected to be fully configured at construction time.
/// The dimensionality of returned vectors is fixed by the backend and must
/// match between ingestion-time and query-time calls for similarity search
/// to find anything.
///
/// A failed call may be reported either as an `Err` or as an empty vector;
/// the pipeline treats both the same way (skip the chunk during ingestion,
/// fall back to ungrounded chat during querying).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
