//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-answer workflow by
//! composing an [`EmbeddingProvider`], a [`ChatModel`], a [`VectorStore`],
//! a [`Chunker`], and a [`TextExtractor`].
//!
//! The public [`answer`](RagPipeline::answer) and
//! [`ingest_file`](RagPipeline::ingest_file) entry points never fail: any
//! fault is caught at the boundary, logged, and rendered as a user-visible
//! error string. The chat surface always gets a string back.
//!
//! # Example
//!
//! ```rust,ignore
//! use docchat_rag::{InMemoryVectorStore, RagConfig, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .chat_model(Arc::new(my_chat_backend))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .build()?;
//!
//! println!("{}", pipeline.ingest_file(Path::new("notes.txt")).await);
//! println!("{}", pipeline.answer("what changed last week?").await);
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use docchat_model::ChatModel;
use tracing::{debug, error, info, warn};

use crate::chunking::{Chunker, SentenceChunker};
use crate::config::RagConfig;
use crate::document::{DocumentChunk, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::extract::{FileTextExtractor, TextExtractor};
use crate::sanitize::sanitize;
use crate::vectorstore::VectorStore;

/// Outcome of a document ingestion run.
///
/// `total` counts the chunks produced by the chunker; `processed` counts
/// those that were embedded and persisted. Chunks whose embedding failed are
/// skipped, so `processed <= total`. A `total` of zero means no extractable
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Name of the ingested document.
    pub document: String,
    /// Chunks successfully embedded and persisted.
    pub processed: usize,
    /// Chunks produced by the chunker.
    pub total: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully processed {} of {} chunks from {}",
            self.processed, self.total, self.document
        )
    }
}

/// The RAG pipeline orchestrator.
///
/// Holds no persistent state of its own; the vector store owns the chunk
/// collection. Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    chat_model: Arc<dyn ChatModel>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
    extractor: Arc<dyn TextExtractor>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Answer a user query, grounding it in retrieved document chunks when
    /// possible.
    ///
    /// This is the catch-all boundary: the caller always receives a string —
    /// a grounded answer, an ungrounded fallback answer, or an explanatory
    /// error message — never a raised fault.
    pub async fn answer(&self, query: &str) -> String {
        match self.try_answer(query).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "query pipeline failed");
                format!("Error: {e}. Please try again.")
            }
        }
    }

    async fn try_answer(&self, query: &str) -> Result<String> {
        info!(query_len = query.len(), "processing query");

        // 1. Embed the query. Failure or an empty vector means retrieval
        //    cannot work; answer ungrounded instead.
        let query_embedding = match self.embedding_provider.embed(query).await {
            Ok(v) if !v.is_empty() => v,
            Ok(_) => {
                warn!("embedding provider returned an empty vector, falling back to simple chat");
                return self.simple_chat(query).await;
            }
            Err(e) => {
                warn!(error = %e, "query embedding failed, falling back to simple chat");
                return self.simple_chat(query).await;
            }
        };

        // 2. Retrieve the most similar chunks. A search failure degrades to
        //    an empty result set rather than failing the whole query.
        let results = match self
            .vector_store
            .search_similar(&query_embedding, self.config.top_k)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "vector search failed, continuing without retrieval");
                Vec::new()
            }
        };

        // 3. Nothing relevant stored: answer ungrounded.
        if results.is_empty() {
            info!("no relevant chunks found, using simple chat");
            return self.simple_chat(query).await;
        }

        // 4.-6. Ground the model in the retrieved chunks and sanitize.
        let context = Self::build_context(&results);
        let answer = self.chat_model.chat_with_context(query, &context).await?;

        info!(result_count = results.len(), "generated grounded response");
        Ok(sanitize(&answer))
    }

    /// Answer without retrieval context. Every path sanitizes, so no caller
    /// ever sees raw markdown.
    async fn simple_chat(&self, query: &str) -> Result<String> {
        let reply = self.chat_model.chat(query).await?;
        Ok(sanitize(&reply))
    }

    /// Assemble the grounding context from ranked search results: a header,
    /// one attributed section per chunk, and a trailing instruction.
    fn build_context(results: &[SearchResult]) -> String {
        let mut context = String::from("Based on the following document content:\n\n");

        for (i, result) in results.iter().enumerate() {
            context.push_str(&format!(
                "--- Document Section {} from '{}' ---\n",
                i + 1,
                result.chunk.document_name
            ));
            context.push_str(&result.chunk.content);
            context.push_str("\n\n");
        }

        context.push_str("Please answer the user's question based on the above context.");
        context.trim().to_string()
    }

    /// Ingest a document file into the vector store.
    ///
    /// Like [`answer`](RagPipeline::answer), this is a catch-all boundary
    /// returning a user-visible string: an ingestion report, a "could not
    /// extract" notice, or an error message.
    pub async fn ingest_file(&self, path: &Path) -> String {
        match self.try_ingest_file(path).await {
            Ok(report) if report.total == 0 => "Could not extract text from file.".to_string(),
            Ok(report) => report.to_string(),
            Err(e) => {
                error!(error = %e, "document ingestion failed");
                format!("Error: {e}")
            }
        }
    }

    /// Ingest a document file, returning the structured report.
    ///
    /// Extraction failures and unsupported formats degrade to empty text
    /// (reported as a zero-chunk ingest); storage failures propagate.
    pub async fn try_ingest_file(&self, path: &Path) -> Result<IngestReport> {
        let document_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = match self.extractor.extract_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, document = %document_name, "text extraction failed");
                String::new()
            }
        };

        self.ingest_text(&document_name, &text).await
    }

    /// Ingest already-extracted text under the given document name.
    ///
    /// Chunks are embedded and persisted strictly in chunker order, one
    /// provider call at a time. A chunk whose embedding fails or comes back
    /// empty is skipped; a persist failure aborts the run with an error
    /// (re-ingestion is the recovery path for the partially stored rest).
    pub async fn ingest_text(&self, document_name: &str, text: &str) -> Result<IngestReport> {
        if text.trim().is_empty() {
            info!(document = %document_name, "no extractable content");
            return Ok(IngestReport { document: document_name.to_string(), processed: 0, total: 0 });
        }

        let chunks = self.chunker.split(text);
        let total = chunks.len();
        let mut processed = 0;

        for chunk in &chunks {
            if chunk.trim().is_empty() {
                continue;
            }

            let embedding = match self.embedding_provider.embed(chunk).await {
                Ok(v) if !v.is_empty() => v,
                Ok(_) => {
                    warn!(document = %document_name, "embedding came back empty, skipping chunk");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, document = %document_name, "chunk embedding failed, skipping chunk");
                    continue;
                }
            };

            let record = DocumentChunk::new(document_name, chunk.clone(), embedding);
            self.vector_store.store(&record).await?;
            processed += 1;
            debug!(document = %document_name, processed, total, "processed chunk");
        }

        info!(document = %document_name, processed, total, "document ingested");
        Ok(IngestReport { document: document_name.to_string(), processed, total })
    }

    /// Return every chunk currently persisted in the vector store.
    pub async fn stored_chunks(&self) -> Result<Vec<DocumentChunk>> {
        self.vector_store.get_all().await
    }

    /// Remove every persisted chunk from the vector store.
    pub async fn clear_documents(&self) -> Result<()> {
        self.vector_store.clear_all().await?;
        info!("cleared all documents from the vector store");
        Ok(())
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config`, `embedding_provider`, `chat_model`, and `vector_store` are
/// required. The chunker defaults to a [`SentenceChunker`] sized from the
/// config, and the extractor to a [`FileTextExtractor`].
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    chat_model: Option<Arc<dyn ChatModel>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    extractor: Option<Arc<dyn TextExtractor>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the chat model.
    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker. Defaults to a [`SentenceChunker`] using the
    /// configured chunk size.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the text extractor. Defaults to [`FileTextExtractor`].
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let chat_model = self
            .chat_model
            .ok_or_else(|| RagError::ConfigError("chat_model is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chunker = self
            .chunker
            .unwrap_or_else(|| Arc::new(SentenceChunker::new(config.chunk_size)));
        let extractor = self.extractor.unwrap_or_else(|| Arc::new(FileTextExtractor::new()));

        Ok(RagPipeline {
            config,
            embedding_provider,
            chat_model,
            vector_store,
            chunker,
            extractor,
        })
    }
}
