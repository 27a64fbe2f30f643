//! SQLite vector store backend.
//!
//! Provides [`SqliteVectorStore`], which implements [`VectorStore`] using
//! [sqlx](https://docs.rs/sqlx) on a single `document_chunks` table.
//! Embeddings are persisted as a JSON array of floats in a TEXT column — the
//! on-disk contract for backends without native vector columns — and search
//! is a brute-force cosine ranking computed in process.
//!
//! This module is only available when the `sqlite` feature is enabled
//! (it is part of the default feature set).
//!
//! # Example
//!
//! ```rust,ignore
//! use docchat_rag::sqlite::SqliteVectorStore;
//!
//! let store = SqliteVectorStore::connect("knowledge.db").await?;
//! store.store(&chunk).await?;
//! let results = store.search_similar(&query_embedding, 5).await?;
//! ```

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::document::{decode_embedding, encode_embedding, DocumentChunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{
    cosine_similarity, rank_and_filter, VectorStore, DEFAULT_SIMILARITY_THRESHOLD,
};

/// A [`VectorStore`] backed by a SQLite database file.
///
/// Each chunk is one row; writes are independent per chunk (no cross-chunk
/// transactions). Search reads every row and ranks in process, so the
/// backend needs no vector extension.
pub struct SqliteVectorStore {
    pool: SqlitePool,
    threshold: f32,
}

impl SqliteVectorStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(Self::map_err)?;

        Self::from_pool(pool).await
    }

    /// Build a store from an existing connection pool and ensure the schema
    /// exists.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool, threshold: DEFAULT_SIMILARITY_THRESHOLD };
        store.init_schema().await?;
        Ok(store)
    }

    /// Override the minimum similarity a search result must exceed.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS document_chunks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document_name TEXT NOT NULL,
                content TEXT NOT NULL,
                embedding TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(Self::map_err)?;

        Ok(())
    }

    fn map_err(e: sqlx::Error) -> RagError {
        RagError::VectorStoreError { backend: "sqlite".to_string(), message: e.to_string() }
    }

    fn row_to_chunk(row: &SqliteRow) -> DocumentChunk {
        let embedding_json: String = row.get("embedding");
        let created_at: DateTime<Utc> = row.get("created_at");
        let updated_at: DateTime<Utc> = row.get("updated_at");

        DocumentChunk {
            id: Some(row.get("id")),
            document_name: row.get("document_name"),
            content: row.get("content"),
            embedding: decode_embedding(&embedding_json),
            created_at,
            updated_at,
        }
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn store(&self, chunk: &DocumentChunk) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO document_chunks
                (document_name, content, embedding, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&chunk.document_name)
        .bind(&chunk.content)
        .bind(encode_embedding(&chunk.embedding))
        .bind(chunk.created_at)
        .bind(chunk.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_err)?;

        let id = result.last_insert_rowid();
        debug!(id, document = %chunk.document_name, "stored chunk");
        Ok(id)
    }

    async fn search_similar(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let rows = sqlx::query(
            "SELECT id, document_name, content, embedding, created_at, updated_at
             FROM document_chunks",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::map_err)?;

        let scored: Vec<SearchResult> = rows
            .iter()
            .map(Self::row_to_chunk)
            .filter(|chunk| chunk.embedding.len() == query.len() && !chunk.embedding.is_empty())
            .map(|chunk| SearchResult {
                score: cosine_similarity(&chunk.embedding, query),
                chunk,
            })
            .collect();

        Ok(rank_and_filter(scored, top_k, self.threshold))
    }

    async fn get_all(&self) -> Result<Vec<DocumentChunk>> {
        let rows = sqlx::query(
            "SELECT id, document_name, content, embedding, created_at, updated_at
             FROM document_chunks
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::map_err)?;

        Ok(rows.iter().map(Self::row_to_chunk).collect())
    }

    async fn clear_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM document_chunks")
            .execute(&self.pool)
            .await
            .map_err(Self::map_err)?;

        debug!("cleared all chunks");
        Ok(())
    }
}
