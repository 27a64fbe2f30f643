//! # docchat-rag
//!
//! The retrieval engine behind the docchat chat application: document
//! chunking, embedding orchestration, vector similarity search, and the RAG
//! pipeline that combines retrieval with generation.
//!
//! ## Overview
//!
//! - [`SentenceChunker`] splits extracted text into bounded, sentence-aligned
//!   chunks.
//! - [`EmbeddingProvider`] is the consumed contract of the external embedding
//!   backend; [`ChatModel`](docchat_model::ChatModel) (from `docchat-model`)
//!   is the generation counterpart.
//! - [`VectorStore`] persists chunks with their embeddings and ranks them by
//!   cosine similarity. [`InMemoryVectorStore`] is always available;
//!   [`SqliteVectorStore`] (feature `sqlite`, on by default) stores embeddings
//!   as JSON text in a single SQLite table.
//! - [`RagPipeline`] ties it all together: ingestion (extract → chunk →
//!   embed → store) and query answering (embed → search → ground → generate →
//!   sanitize), degrading to ungrounded chat when retrieval cannot help.
//! - [`sanitize`] strips markdown artifacts from generated answers for
//!   plain-text display surfaces.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docchat_rag::{InMemoryVectorStore, RagConfig, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .chat_model(Arc::new(my_chat_backend))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .build()?;
//!
//! let report = pipeline.ingest_file(Path::new("notes.txt")).await;
//! let answer = pipeline.answer("what do my notes say about rust?").await;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod inmemory;
pub mod pipeline;
pub mod sanitize;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod vectorstore;

pub use chunking::{Chunker, SentenceChunker, DEFAULT_CHUNK_SIZE};
pub use config::{RagConfig, RagConfigBuilder, DEFAULT_INGEST_CHUNK_SIZE, DEFAULT_QUERY_TOP_K};
pub use document::{decode_embedding, encode_embedding, DocumentChunk, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use extract::{FileTextExtractor, TextExtractor};
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{IngestReport, RagPipeline, RagPipelineBuilder};
pub use sanitize::sanitize;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteVectorStore;
pub use vectorstore::{
    cosine_similarity, VectorStore, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K,
};
