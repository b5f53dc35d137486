use crate::{Document, StoreError};
use async_trait::async_trait;

/// Minimal contract of the external document database.
#[async_trait]
pub trait DocumentStore {
    /// Create or fully overwrite the record keyed by `document.id`.
    async fn put(&self, document: &Document) -> Result<(), StoreError>;

    /// Every stored document, most recently uploaded first.
    async fn list_by_recency(&self) -> Result<Vec<Document>, StoreError>;
}

/// Where raw uploaded objects are read from.
#[async_trait]
pub trait ObjectSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, StoreError>;
}

#[async_trait]
impl<T> DocumentStore for std::sync::Arc<T>
where
    T: DocumentStore + Send + Sync + ?Sized,
{
    async fn put(&self, document: &Document) -> Result<(), StoreError> {
        (**self).put(document).await
    }

    async fn list_by_recency(&self) -> Result<Vec<Document>, StoreError> {
        (**self).list_by_recency().await
    }
}
