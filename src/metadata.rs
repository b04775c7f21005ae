//! Document metadata store collaborator.
//!
//! Persistence of document records (database tables, ORMs, migrations) lives
//! outside this crate; the pipeline only needs to create a record per upload
//! and hold on to its id.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::Document;
use crate::error::Result;

/// An external store for [`Document`] records.
///
/// One record is created per ingestion call; this crate never updates or
/// deletes them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create and persist a document record for `(owner, name)` at `locator`.
    async fn create_document(&self, owner: &str, name: &str, locator: &str) -> Result<Document>;
}

/// An in-memory [`DocumentStore`] for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records created so far, in creation order.
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_document(&self, owner: &str, name: &str, locator: &str) -> Result<Document> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            name: name.to_string(),
            locator: locator.to_string(),
        };
        self.documents.write().await.push(document.clone());
        Ok(document)
    }
}
