//! Embedding provider trait for turning text into vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings for batches of text.
///
/// Implementations wrap a specific backend (an OpenAI-compatible API, a
/// deterministic test stub, ...) behind a single batch call: one network
/// round trip per invocation, one vector per input string, in input order.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::EmbeddingProvider;
///
/// let vectors = provider.embed_many(&["hello", "world"]).await?;
/// assert_eq!(vectors.len(), 2);
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// Order-preserving: `vectors[i]` corresponds to `texts[i]`. An empty
    /// input yields an empty output without touching the network. Vectors
    /// are never empty on success.
    async fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}
