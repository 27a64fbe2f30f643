//! Data types for stored document chunks and search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of retrievable knowledge: a fragment of document text together
/// with its embedding vector and provenance.
///
/// Chunks are created during ingestion after chunking and embedding succeed,
/// persisted by a [`VectorStore`](crate::VectorStore), and never mutated
/// afterwards — content and embedding change together or not at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    /// Identifier assigned by the store on persist; `None` before that.
    pub id: Option<i64>,
    /// Name of the source document this chunk was cut from.
    pub document_name: String,
    /// The chunk text. Non-empty.
    pub content: String,
    /// The embedding vector. Empty means not computed or failed; otherwise
    /// the length equals the provider's fixed dimensionality.
    pub embedding: Vec<f32>,
    /// When the chunk was ingested.
    pub created_at: DateTime<Utc>,
    /// When the chunk was last written.
    pub updated_at: DateTime<Utc>,
}

impl DocumentChunk {
    /// Create a new unpersisted chunk stamped with the current time.
    pub fn new(
        document_name: impl Into<String>,
        content: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            document_name: document_name.into(),
            content: content.into(),
            embedding,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A retrieved [`DocumentChunk`] paired with its cosine similarity to the
/// query vector. Result lists are ordered by descending score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: DocumentChunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// Encode an embedding vector as a JSON array of numbers.
///
/// This is the textual on-disk representation used by storage backends
/// without native vector columns.
pub fn encode_embedding(embedding: &[f32]) -> String {
    serde_json::to_string(embedding).unwrap_or_else(|_| "[]".to_string())
}

/// Decode an embedding vector from its JSON text encoding.
///
/// Malformed or empty input decodes to an empty vector rather than an
/// error; such chunks are excluded from similarity comparisons but still
/// appear in full scans.
pub fn decode_embedding(encoded: &str) -> Vec<f32> {
    if encoded.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(encoded).unwrap_or_default()
}
