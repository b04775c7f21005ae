//! Error types for the `docrag` crate.

use thiserror::Error;

/// Errors that can occur during ingestion and retrieval.
#[derive(Debug, Error)]
pub enum RagError {
    /// Required configuration (credentials, model name) is missing or invalid.
    ///
    /// Fatal: retrying without operator intervention cannot succeed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream embedding call did not complete successfully
    /// (non-success status, timeout, or malformed payload).
    ///
    /// The caller may retry the whole batch.
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The input file could not be turned into plain text.
    ///
    /// Terminal for that document.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The document yielded no extractable text; there is nothing to index.
    #[error("document contains no extractable text")]
    EmptyContent,

    /// The embedding step produced nothing usable for this call.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// An existing collection is sized for a different embedding model.
    ///
    /// Fatal: requires operator intervention.
    #[error("collection dimension mismatch: expected {expected}, found {actual}")]
    DimensionMismatch {
        /// The dimension the caller asked for.
        expected: usize,
        /// The dimension the existing collection is configured with.
        actual: usize,
    },

    /// Caller misuse, e.g. a non-positive search limit.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An error in the vector store or metadata store backend.
    #[error("Store error ({backend}): {message}")]
    Store {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for ingestion and retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
