//! Data types for documents, vector points, and search results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record identifying an ingested file.
///
/// Created once per upload by the [`DocumentStore`](crate::metadata::DocumentStore)
/// collaborator and immutable thereafter. Vector points reference it by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The owner (tenant) this document belongs to.
    pub owner_id: String,
    /// Display name, usually the uploaded filename.
    pub name: String,
    /// Storage locator for the raw file.
    pub locator: String,
}

/// Payload stored alongside each vector.
///
/// `owner_id` and `document_id` are set exactly once at point assembly and
/// are the sole means of access isolation; the chunk text is carried so that
/// context can be rebuilt without a second fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointPayload {
    /// The owner (tenant) of the source document.
    pub owner_id: String,
    /// The id of the source [`Document`].
    pub document_id: String,
    /// Ordinal position of the chunk within the document.
    pub chunk_index: usize,
    /// The original chunk text.
    pub text: String,
}

/// The unit of vector storage: an id, an embedding, and its payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorPoint {
    /// Globally unique point id.
    pub id: Uuid,
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// Owner, document, ordinal, and text carried with the vector.
    pub payload: PointPayload,
}

/// A conjunction of equality constraints scoping a search to one tenant,
/// and optionally one document.
///
/// Constraints are ANDed; an absent `document_id` leaves that field
/// unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilter {
    /// Required: only points owned by this tenant match.
    pub owner_id: String,
    /// Optional: restrict further to a single document.
    pub document_id: Option<String>,
}

impl SearchFilter {
    /// Create a filter scoping results to one owner.
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self { owner_id: owner_id.into(), document_id: None }
    }

    /// Restrict the filter to a single document.
    #[must_use]
    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Whether the given payload satisfies every constraint.
    pub fn matches(&self, payload: &PointPayload) -> bool {
        if payload.owner_id != self.owner_id {
            return false;
        }
        match &self.document_id {
            Some(id) => payload.document_id == *id,
            None => true,
        }
    }
}

/// A retrieved [`VectorPoint`] paired with a similarity score.
///
/// Search results are ordered by descending score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoint {
    /// The retrieved point.
    pub point: VectorPoint,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(owner: &str, doc: &str) -> PointPayload {
        PointPayload {
            owner_id: owner.to_string(),
            document_id: doc.to_string(),
            chunk_index: 0,
            text: "body".to_string(),
        }
    }

    #[test]
    fn owner_filter_matches_same_owner_any_document() {
        let filter = SearchFilter::for_owner("alice");
        assert!(filter.matches(&payload("alice", "d1")));
        assert!(filter.matches(&payload("alice", "d2")));
        assert!(!filter.matches(&payload("bob", "d1")));
    }

    #[test]
    fn document_scope_is_anded_with_owner() {
        let filter = SearchFilter::for_owner("alice").with_document("d1");
        assert!(filter.matches(&payload("alice", "d1")));
        assert!(!filter.matches(&payload("alice", "d2")));
        assert!(!filter.matches(&payload("bob", "d1")));
    }
}
