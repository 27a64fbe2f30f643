//! Vector store trait for persisting chunks and searching by similarity.

use async_trait::async_trait;

use crate::document::{DocumentChunk, SearchResult};
use crate::error::Result;

/// Default number of results returned by a similarity search.
pub const DEFAULT_TOP_K: usize = 5;

/// Default minimum cosine similarity a result must exceed to be returned.
///
/// A reasonable default, not a tuned value; override per store with
/// `with_threshold`.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.7;

/// A storage backend for document chunks with cosine similarity search.
///
/// Implementations own the persisted chunk collection. Writes are
/// independent per chunk — there are no cross-chunk transactions, so a
/// crash mid-ingestion leaves a partially persisted document and
/// re-ingestion is the recovery path.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_rag::{DocumentChunk, InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.store(&DocumentChunk::new("notes.txt", "text", vec![1.0, 0.0])).await?;
/// let results = store.search_similar(&[1.0, 0.0], 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Persist one chunk, returning its assigned identifier.
    ///
    /// Storage failures are returned to the caller — silently losing a
    /// chunk is worse than failing loudly.
    async fn store(&self, chunk: &DocumentChunk) -> Result<i64>;

    /// Return the `top_k` stored chunks most similar to `query`, ordered by
    /// descending cosine similarity and filtered to scores above the
    /// store's relevance threshold.
    ///
    /// Chunks whose embedding is empty or of a different dimensionality are
    /// skipped, not errored. The scan is linear over every stored chunk —
    /// O(n·d) per query, fine at single-tenant knowledge-base scale.
    async fn search_similar(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Return every stored chunk. Full scan, no pagination.
    async fn get_all(&self) -> Result<Vec<DocumentChunk>>;

    /// Remove every stored chunk unconditionally.
    async fn clear_all(&self) -> Result<()>;
}

/// Compute the cosine similarity `dot(a, b) / (|a| * |b|)` of two vectors.
///
/// Returns 0.0 when the dimensions differ or either magnitude is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Rank `scored` in place by descending score, truncate to `top_k`, then
/// drop results at or below `threshold`.
///
/// The sort is stable, so equal scores keep their scan order and results
/// are reproducible. Shared by store implementations.
pub(crate) fn rank_and_filter(
    mut scored: Vec<SearchResult>,
    top_k: usize,
    threshold: f32,
) -> Vec<SearchResult> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored.retain(|r| r.score > threshold);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentChunk;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![0.5f32, -1.0, 2.0, 0.25];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_has_similarity_zero() {
        let v = vec![1.0f32, 2.0, 3.0];
        let zero = vec![0.0f32; 3];
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn mismatched_dimensions_have_similarity_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
    }

    #[test]
    fn opposite_vectors_have_similarity_minus_one() {
        let v = vec![1.0f32, -2.0];
        let w = vec![-1.0f32, 2.0];
        assert!((cosine_similarity(&v, &w) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn ranking_truncates_before_filtering() {
        let result = |score: f32| SearchResult {
            chunk: DocumentChunk::new("doc", "text", vec![1.0]),
            score,
        };
        // Five candidates, top_k = 2: the 0.8 in third place is cut by
        // truncation even though it clears the threshold.
        let scored = vec![result(0.72), result(0.95), result(0.8), result(0.1), result(0.9)];
        let ranked = rank_and_filter(scored, 2, DEFAULT_SIMILARITY_THRESHOLD);
        let scores: Vec<f32> = ranked.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![0.95, 0.9]);
    }

    #[test]
    fn threshold_is_strict() {
        let result = |score: f32| SearchResult {
            chunk: DocumentChunk::new("doc", "text", vec![1.0]),
            score,
        };
        let ranked = rank_and_filter(vec![result(0.7)], 5, 0.7);
        assert!(ranked.is_empty());
    }
}
