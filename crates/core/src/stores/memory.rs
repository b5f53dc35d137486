//! In-memory document store, used by tests and embedded callers.

use super::sort_by_recency;
use crate::traits::DocumentStore;
use crate::{Document, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents.read().await.get(id).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(&self, document: &Document) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.clone());
        Ok(())
    }

    async fn list_by_recency(&self) -> Result<Vec<Document>, StoreError> {
        let mut documents: Vec<Document> = self.documents.read().await.values().cloned().collect();
        sort_by_recency(&mut documents);
        Ok(documents)
    }
}
