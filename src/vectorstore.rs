//! Vector store trait for storing and searching embedding vectors.

use async_trait::async_trait;

use crate::document::{ScoredPoint, SearchFilter, VectorPoint};
use crate::error::Result;

/// A tenant-partitioned similarity index.
///
/// Implementations manage a single collection of [`VectorPoint`]s and support
/// idempotent collection setup, batch upsert, and filtered nearest-neighbor
/// search under cosine (or equivalent) similarity.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{VectorStore, InMemoryVectorStore, SearchFilter};
///
/// let store = InMemoryVectorStore::new();
/// store.ensure_collection(384).await?;
/// store.upsert(&points).await?;
/// let results = store.search(&query_vector, 5, &SearchFilter::for_owner("alice")).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Make sure the backing collection exists and is sized for `dimension`.
    ///
    /// Idempotent: repeated calls with the same dimension are no-ops. An
    /// existing collection with a different configured dimension fails with
    /// [`RagError::DimensionMismatch`](crate::RagError::DimensionMismatch);
    /// the collection is never dropped and recreated.
    async fn ensure_collection(&self, dimension: usize) -> Result<()>;

    /// Insert or overwrite points by id.
    ///
    /// Atomic per call from the caller's perspective: either every requested
    /// point is visible to subsequent searches, or the call fails. Backends
    /// that cannot guarantee this must surface partial failure explicitly.
    async fn upsert(&self, points: &[VectorPoint]) -> Result<()>;

    /// Return up to `limit` nearest neighbors of `vector`, restricted to
    /// points whose payload satisfies every constraint in `filter`.
    ///
    /// Results are ordered by descending similarity score. A `limit` of zero
    /// fails with [`RagError::InvalidArgument`](crate::RagError::InvalidArgument).
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<ScoredPoint>>;
}
