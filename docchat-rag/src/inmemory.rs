//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] keeps chunks in a `Vec` behind a
//! `tokio::sync::RwLock`. Suitable for development, testing, and small
//! single-tenant knowledge bases.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{DocumentChunk, SearchResult};
use crate::error::Result;
use crate::vectorstore::{
    cosine_similarity, rank_and_filter, VectorStore, DEFAULT_SIMILARITY_THRESHOLD,
};

/// An in-memory [`VectorStore`] using brute-force cosine similarity search.
///
/// Chunks are held in insertion order; identifiers are assigned from a
/// monotonic counter on [`store`](VectorStore::store). All operations are
/// async-safe via `tokio::sync::RwLock`.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    chunks: RwLock<Vec<DocumentChunk>>,
    next_id: AtomicI64,
    threshold: f32,
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self {
            chunks: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl InMemoryVectorStore {
    /// Create a new empty store with the default relevance threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the minimum similarity a search result must exceed.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn store(&self, chunk: &DocumentChunk) -> Result<i64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut stored = chunk.clone();
        stored.id = Some(id);

        let mut chunks = self.chunks.write().await;
        chunks.push(stored);
        Ok(id)
    }

    async fn search_similar(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let chunks = self.chunks.read().await;

        let scored: Vec<SearchResult> = chunks
            .iter()
            .filter(|chunk| chunk.embedding.len() == query.len() && !chunk.embedding.is_empty())
            .map(|chunk| SearchResult {
                score: cosine_similarity(&chunk.embedding, query),
                chunk: chunk.clone(),
            })
            .collect();

        Ok(rank_and_filter(scored, top_k, self.threshold))
    }

    async fn get_all(&self) -> Result<Vec<DocumentChunk>> {
        let chunks = self.chunks.read().await;
        Ok(chunks.clone())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut chunks = self.chunks.write().await;
        chunks.clear();
        Ok(())
    }
}
