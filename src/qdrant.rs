//! Qdrant vector store backend.
//!
//! Provides [`QdrantVectorStore`] which implements [`VectorStore`] using
//! the [qdrant-client](https://docs.rs/qdrant-client) crate over gRPC.
//! Only available when the `qdrant` feature is enabled.

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::vectors_config;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, Distance, Filter, GetCollectionInfoResponse, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::debug;
use uuid::Uuid;

use crate::document::{PointPayload, ScoredPoint, SearchFilter, VectorPoint};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// A [`VectorStore`] backed by [Qdrant](https://qdrant.tech/).
///
/// Wraps a [`qdrant_client::Qdrant`] client and maps one named Qdrant
/// collection (cosine distance) to the store. Point payloads are stored as
/// Qdrant payload fields, and tenant scoping is expressed as a `must`
/// conjunction of payload match conditions.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
}

impl QdrantVectorStore {
    /// Connect to Qdrant at `url`, using the named collection.
    pub fn new(url: &str, collection: impl Into<String>) -> Result<Self> {
        let client = Qdrant::from_url(url).build().map_err(Self::map_err)?;
        Ok(Self { client, collection: collection.into() })
    }

    /// Wrap an existing client, using the named collection.
    pub fn from_client(client: Qdrant, collection: impl Into<String>) -> Self {
        Self { client, collection: collection.into() }
    }

    fn map_err(e: qdrant_client::QdrantError) -> RagError {
        RagError::Store { backend: "qdrant".to_string(), message: e.to_string() }
    }

    /// The vector size an existing collection was created with, if it can be
    /// read from the collection info.
    fn configured_dimension(info: &GetCollectionInfoResponse) -> Option<usize> {
        let params = info.result.as_ref()?.config.as_ref()?.params.as_ref()?;
        match params.vectors_config.as_ref()?.config.as_ref()? {
            vectors_config::Config::Params(p) => Some(p.size as usize),
            vectors_config::Config::ParamsMap(_) => None,
        }
    }

    fn extract_string(value: &QdrantValue) -> Option<String> {
        match &value.kind {
            Some(Kind::StringValue(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn extract_index(value: &QdrantValue) -> Option<usize> {
        match &value.kind {
            Some(Kind::IntegerValue(i)) => usize::try_from(*i).ok(),
            _ => None,
        }
    }

    fn to_filter(filter: &SearchFilter) -> Filter {
        let mut must = vec![Condition::matches("owner_id", filter.owner_id.clone())];
        if let Some(document_id) = &filter.document_id {
            must.push(Condition::matches("document_id", document_id.clone()));
        }
        Filter::must(must)
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn ensure_collection(&self, dimension: usize) -> Result<()> {
        let exists =
            self.client.collection_exists(&self.collection).await.map_err(Self::map_err)?;
        if exists {
            let info =
                self.client.collection_info(&self.collection).await.map_err(Self::map_err)?;
            return match Self::configured_dimension(&info) {
                Some(actual) if actual == dimension => {
                    debug!(collection = %self.collection, "qdrant collection already exists");
                    Ok(())
                }
                Some(actual) => Err(RagError::DimensionMismatch { expected: dimension, actual }),
                None => Err(RagError::Store {
                    backend: "qdrant".to_string(),
                    message: format!(
                        "could not determine configured dimension of collection '{}'",
                        self.collection
                    ),
                }),
            };
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dimension as u64, Distance::Cosine)),
            )
            .await
            .map_err(Self::map_err)?;

        debug!(collection = %self.collection, dimension, "created qdrant collection");
        Ok(())
    }

    async fn upsert(&self, points: &[VectorPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = points
            .iter()
            .map(|point| {
                let payload_value = serde_json::json!({
                    "owner_id": point.payload.owner_id,
                    "document_id": point.payload.document_id,
                    "chunk_index": point.payload.chunk_index,
                    "text": point.payload.text,
                });
                let payload = Payload::try_from(payload_value).map_err(|e| RagError::Store {
                    backend: "qdrant".to_string(),
                    message: format!("invalid payload: {e}"),
                })?;
                Ok(PointStruct::new(point.id.to_string(), point.vector.clone(), payload))
            })
            .collect::<Result<_>>()?;

        let count = points.len();
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(Self::map_err)?;

        debug!(collection = %self.collection, count, "upserted points to qdrant");
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

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector.to_vec(), limit as u64)
                    .filter(Self::to_filter(filter))
                    .with_payload(true),
            )
            .await
            .map_err(Self::map_err)?;

        let results = response
            .result
            .into_iter()
            .map(|scored| {
                let id = scored
                    .id
                    .as_ref()
                    .and_then(|pid| match &pid.point_id_options {
                        Some(PointIdOptions::Uuid(s)) => Uuid::parse_str(s).ok(),
                        _ => None,
                    })
                    .unwrap_or_else(Uuid::nil);

                let payload = PointPayload {
                    owner_id: scored
                        .payload
                        .get("owner_id")
                        .and_then(Self::extract_string)
                        .unwrap_or_default(),
                    document_id: scored
                        .payload
                        .get("document_id")
                        .and_then(Self::extract_string)
                        .unwrap_or_default(),
                    chunk_index: scored
                        .payload
                        .get("chunk_index")
                        .and_then(Self::extract_index)
                        .unwrap_or_default(),
                    text: scored
                        .payload
                        .get("text")
                        .and_then(Self::extract_string)
                        .unwrap_or_default(),
                };

                // Qdrant does not return vectors unless asked; the payload is
                // all retrieval needs.
                ScoredPoint {
                    point: VectorPoint { id, vector: Vec::new(), payload },
                    score: scored.score,
                }
            })
            .collect();

        Ok(results)
    }
}
