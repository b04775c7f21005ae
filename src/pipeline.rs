//! Ingestion and retrieval orchestrators.
//!
//! [`IngestionPipeline`] drives extract → chunk → embed → upsert;
//! [`RetrievalPipeline`] drives embed → filtered search → context → prompt.
//! The two share only the [`EmbeddingProvider`] and [`VectorStore`]
//! abstractions; data flows one way, from ingestion into the store and from
//! the store out through retrieval.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::chunking::TextChunker;
use crate::document::{Document, PointPayload, ScoredPoint, SearchFilter, VectorPoint};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::extract::TextExtractor;
use crate::metadata::DocumentStore;
use crate::prompt::PromptBuilder;
use crate::vectorstore::VectorStore;

/// Separator placed between context passages, in ranking order.
const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Default number of neighbors to retrieve.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 5;

/// The outcome of an ingestion call.
///
/// The chunk texts themselves are not exposed; they live only in the vector
/// store payloads.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// The document record created for this upload.
    pub document: Document,
    /// How many chunks were embedded and stored.
    pub chunk_count: usize,
}

/// Orchestrates document ingestion: record → extract → chunk → embed → upsert.
///
/// Each call is a sequential chain of awaited collaborator calls with no
/// shared mutable state, so concurrent ingestions of different documents are
/// independent: every point batch carries freshly generated ids and is scoped
/// by owner and document in its payload.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::IngestionPipeline;
///
/// let pipeline = IngestionPipeline::new(store, extractor, chunker, embedder, vectors);
/// let report = pipeline.ingest(raw_bytes, "report.txt", "alice").await?;
/// println!("indexed {} chunks", report.chunk_count);
/// ```
pub struct IngestionPipeline {
    documents: Arc<dyn DocumentStore>,
    extractor: Arc<dyn TextExtractor>,
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    vectors: Arc<dyn VectorStore>,
}

impl IngestionPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        extractor: Arc<dyn TextExtractor>,
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        vectors: Arc<dyn VectorStore>,
    ) -> Self {
        Self { documents, extractor, chunker, embedder, vectors }
    }

    /// Ingest one uploaded file for `owner`.
    ///
    /// The document record is created first and is not rolled back on later
    /// failures: a document with zero chunks is a legitimate, queryable-as-
    /// empty state, not corruption.
    ///
    /// # Errors
    ///
    /// - [`RagError::Extraction`] when the bytes cannot be turned into text;
    /// - [`RagError::EmptyContent`] when chunking yields nothing — no
    ///   embedding or store call is made;
    /// - [`RagError::Embedding`] when the embedding step fails or returns a
    ///   batch that does not line up one-to-one with the chunks;
    /// - [`RagError::DimensionMismatch`] when the collection is sized for a
    ///   different model;
    /// - store errors from the upsert itself.
    pub async fn ingest(
        &self,
        raw_bytes: &[u8],
        filename: &str,
        owner: &str,
    ) -> Result<IngestReport> {
        // Storage mechanics are the caller's concern; the filename doubles as
        // the locator here.
        let document = self.documents.create_document(owner, filename, filename).await?;

        let text = self.extractor.extract(raw_bytes).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "text extraction failed");
        })?;

        let chunks = self.chunker.chunk(&text);
        if chunks.is_empty() {
            info!(document.id = %document.id, "document has no extractable text");
            return Err(RagError::EmptyContent);
        }

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed_many(&texts).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
        })?;

        // One vector per chunk, paired strictly by index. A shortfall means
        // the provider broke its contract; an empty stand-in vector would
        // silently poison search, so fail the call instead.
        if vectors.len() != chunks.len() || vectors.iter().any(Vec::is_empty) {
            return Err(RagError::Embedding(format!(
                "expected {} non-empty vectors, got {}",
                chunks.len(),
                vectors.len()
            )));
        }

        self.vectors.ensure_collection(vectors[0].len()).await?;

        let points: Vec<VectorPoint> = chunks
            .into_iter()
            .zip(vectors)
            .enumerate()
            .map(|(chunk_index, (text, vector))| VectorPoint {
                id: Uuid::new_v4(),
                vector,
                payload: PointPayload {
                    owner_id: owner.to_string(),
                    document_id: document.id.clone(),
                    chunk_index,
                    text,
                },
            })
            .collect();

        let chunk_count = points.len();
        self.vectors.upsert(&points).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "upsert failed during ingestion");
        })?;

        info!(document.id = %document.id, owner, chunk_count, "ingested document");
        Ok(IngestReport { document, chunk_count })
    }
}

/// Orchestrates question answering: embed query → filtered search → context
/// → prompt.
///
/// The owner-scoped [`SearchFilter`] built here is the sole tenant isolation
/// mechanism; no other layer enforces it.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::RetrievalPipeline;
///
/// let pipeline = RetrievalPipeline::new(embedder, vectors);
/// let results = pipeline.retrieve("what is chapter 2 about?", "alice", None, 5).await?;
/// let context = RetrievalPipeline::build_context(&results);
/// let prompt = pipeline.build_prompt("what is chapter 2 about?", &context);
/// ```
pub struct RetrievalPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    vectors: Arc<dyn VectorStore>,
    prompt: PromptBuilder,
}

impl RetrievalPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, vectors: Arc<dyn VectorStore>) -> Self {
        Self { embedder, vectors, prompt: PromptBuilder }
    }

    /// Retrieve up to `limit` passages relevant to `query`, scoped to
    /// `owner` and optionally to a single document.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] when the query cannot be embedded,
    /// [`RagError::InvalidArgument`] for a zero limit, and store errors from
    /// the search itself.
    pub async fn retrieve(
        &self,
        query: &str,
        owner: &str,
        document: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let mut vectors = self.embedder.embed_many(&[query]).await.inspect_err(|e| {
            error!(error = %e, "embedding failed during retrieval");
        })?;
        let query_vector = match vectors.pop() {
            Some(v) if !v.is_empty() => v,
            _ => return Err(RagError::Embedding("failed to embed the query".to_string())),
        };

        let mut filter = SearchFilter::for_owner(owner);
        if let Some(document_id) = document {
            filter = filter.with_document(document_id);
        }

        let results = self.vectors.search(&query_vector, limit, &filter).await?;
        info!(owner, result_count = results.len(), "retrieval completed");
        Ok(results)
    }

    /// Concatenate result payload texts in ranking order.
    ///
    /// Entries with empty text are skipped without disturbing the order of
    /// the remainder; ranking order mirrors relevance and is never re-sorted.
    pub fn build_context(results: &[ScoredPoint]) -> String {
        let texts: Vec<&str> = results
            .iter()
            .map(|r| r.point.payload.text.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        texts.join(CONTEXT_SEPARATOR)
    }

    /// Render the fixed grounded-answer prompt for `query` over `context`.
    pub fn build_prompt(&self, query: &str, context: &str) -> String {
        self.prompt.build(query, context)
    }
}
