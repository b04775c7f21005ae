//! Document ingestion and retrieval for retrieval-augmented generation.
//!
//! `docrag` turns unstructured documents into a searchable, tenant-scoped
//! vector index and answers natural-language questions by retrieving
//! relevant passages and composing a grounded prompt for a downstream
//! language model.
//!
//! Two pipelines do the work:
//!
//! - [`IngestionPipeline`] — extract text → chunk → embed → upsert points;
//! - [`RetrievalPipeline`] — embed query → filtered search → context →
//!   prompt.
//!
//! They share only the [`EmbeddingProvider`] and [`VectorStore`] capability
//! traits, so a local deterministic stub, an OpenAI-compatible backend
//! (feature `openai`), and a self-hosted Qdrant instance (feature `qdrant`)
//! are interchangeable.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{
//!     EmbeddingConfig, IngestionPipeline, InMemoryDocumentStore, InMemoryVectorStore,
//!     OpenAiEmbeddingProvider, RetrievalPipeline, TextChunker, Utf8TextExtractor,
//! };
//!
//! let embedder = Arc::new(OpenAiEmbeddingProvider::new(EmbeddingConfig::new(api_key))?);
//! let vectors = Arc::new(InMemoryVectorStore::new());
//!
//! let ingestion = IngestionPipeline::new(
//!     Arc::new(InMemoryDocumentStore::new()),
//!     Arc::new(Utf8TextExtractor),
//!     TextChunker::default(),
//!     embedder.clone(),
//!     vectors.clone(),
//! );
//! let report = ingestion.ingest(bytes, "notes.txt", "alice").await?;
//!
//! let retrieval = RetrievalPipeline::new(embedder, vectors);
//! let results = retrieval.retrieve("what do my notes say?", "alice", None, 5).await?;
//! let prompt = retrieval.build_prompt("what do my notes say?", &RetrievalPipeline::build_context(&results));
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod inmemory;
pub mod metadata;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod prompt;
#[cfg(feature = "qdrant")]
pub mod qdrant;
pub mod vectorstore;

pub use chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, TextChunker};
pub use config::{DEFAULT_EMBEDDING_MODEL, DEFAULT_TIMEOUT, EmbeddingConfig};
pub use document::{Document, PointPayload, ScoredPoint, SearchFilter, VectorPoint};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use extract::{TextExtractor, Utf8TextExtractor};
pub use inmemory::InMemoryVectorStore;
pub use metadata::{DocumentStore, InMemoryDocumentStore};
#[cfg(feature = "openai")]
pub use openai::OpenAiEmbeddingProvider;
pub use pipeline::{DEFAULT_RETRIEVAL_LIMIT, IngestReport, IngestionPipeline, RetrievalPipeline};
pub use prompt::PromptBuilder;
#[cfg(feature = "qdrant")]
pub use qdrant::QdrantVectorStore;
pub use vectorstore::VectorStore;
