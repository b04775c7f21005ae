//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] backs the store trait with a `HashMap` behind a
//! `tokio::sync::RwLock`. It honors the same filter and dimension semantics
//! as the networked backends, which makes the full pipeline runnable in
//! tests and small deployments without external services.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{ScoredPoint, SearchFilter, VectorPoint};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// An in-memory [`VectorStore`] using cosine similarity for search.
///
/// The collection's dimension is recorded on the first
/// [`ensure_collection`](VectorStore::ensure_collection) call and verified
/// on every subsequent one.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    inner: RwLock<Collection>,
}

#[derive(Debug, Default)]
struct Collection {
    dimension: Option<usize>,
    points: HashMap<Uuid, VectorPoint>,
}

impl InMemoryVectorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of points currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.points.len()
    }

    /// Whether the store holds no points.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.points.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(&self, dimension: usize) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.dimension {
            None => {
                inner.dimension = Some(dimension);
                Ok(())
            }
            Some(actual) if actual == dimension => Ok(()),
            Some(actual) => Err(RagError::DimensionMismatch { expected: dimension, actual }),
        }
    }

    async fn upsert(&self, points: &[VectorPoint]) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.dimension.is_none() {
            return Err(RagError::Store {
                backend: "inmemory".to_string(),
                message: "collection has not been created".to_string(),
            });
        }
        // Single write-lock section: all points land together or not at all.
        for point in points {
            inner.points.insert(point.id, point.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<ScoredPoint>> {
        if limit == 0 {
            return Err(RagError::InvalidArgument("search limit must be positive".to_string()));
        }

        let inner = self.inner.read().await;
        let mut scored: Vec<ScoredPoint> = inner
            .points
            .values()
            .filter(|point| filter.matches(&point.payload))
            .map(|point| ScoredPoint {
                score: cosine_similarity(&point.vector, vector),
                point: point.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PointPayload;

    fn point(owner: &str, doc: &str, index: usize, vector: Vec<f32>) -> VectorPoint {
        VectorPoint {
            id: Uuid::new_v4(),
            vector,
            payload: PointPayload {
                owner_id: owner.to_string(),
                document_id: doc.to_string(),
                chunk_index: index,
                text: format!("chunk {index}"),
            },
        }
    }

    #[tokio::test]
    async fn ensure_collection_is_idempotent_but_rejects_resize() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection(4).await.unwrap();
        store.ensure_collection(4).await.unwrap();
        let err = store.ensure_collection(8).await.unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch { expected: 8, actual: 4 }));
    }

    #[tokio::test]
    async fn upsert_overwrites_by_id() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection(2).await.unwrap();

        let mut p = point("alice", "d1", 0, vec![1.0, 0.0]);
        store.upsert(std::slice::from_ref(&p)).await.unwrap();
        p.vector = vec![0.0, 1.0];
        store.upsert(std::slice::from_ref(&p)).await.unwrap();

        assert_eq!(store.len().await, 1);
        let results =
            store.search(&[0.0, 1.0], 1, &SearchFilter::for_owner("alice")).await.unwrap();
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn zero_limit_is_invalid() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection(2).await.unwrap();
        let err =
            store.search(&[1.0, 0.0], 0, &SearchFilter::for_owner("alice")).await.unwrap_err();
        assert!(matches!(err, RagError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn search_respects_owner_filter_over_similarity() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection(2).await.unwrap();

        // Bob's point is a perfect match for the query; Alice's is not.
        store
            .upsert(&[
                point("alice", "d1", 0, vec![0.2, 1.0]),
                point("bob", "d2", 0, vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results =
            store.search(&[1.0, 0.0], 10, &SearchFilter::for_owner("alice")).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].point.payload.owner_id, "alice");
    }

    #[tokio::test]
    async fn search_orders_descending_and_truncates() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection(2).await.unwrap();
        store
            .upsert(&[
                point("alice", "d1", 0, vec![1.0, 0.0]),
                point("alice", "d1", 1, vec![0.7, 0.7]),
                point("alice", "d1", 2, vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        let results =
            store.search(&[1.0, 0.0], 2, &SearchFilter::for_owner("alice")).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
        assert_eq!(results[0].point.payload.chunk_index, 0);
    }
}
