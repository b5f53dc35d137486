//! Local-disk document store and object source for the command line.

use super::sort_by_recency;
use crate::traits::{DocumentStore, ObjectSource};
use crate::{Document, StoreError, DOCUMENTS_COLLECTION};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// One JSON file per document under `<root>/documents/`, named by the SHA-256 of its id.
pub struct FsStore {
    collection_dir: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            collection_dir: root.into().join(DOCUMENTS_COLLECTION),
        }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(id.as_bytes());
        self.collection_dir
            .join(format!("{:x}.json", hasher.finalize()))
    }
}

#[async_trait]
impl DocumentStore for FsStore {
    async fn put(&self, document: &Document) -> Result<(), StoreError> {
        fs::create_dir_all(&self.collection_dir).await?;

        let target = self.record_path(&document.id);
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(document)?).await?;
        fs::rename(&staging, &target).await?;
        Ok(())
    }

    async fn list_by_recency(&self) -> Result<Vec<Document>, StoreError> {
        let mut entries = match fs::read_dir(&self.collection_dir).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let raw = fs::read(&path).await?;
            match serde_json::from_slice::<Document>(&raw) {
                Ok(document) => documents.push(document),
                Err(error) => warn!(path = %path.display(), %error, "skipping unreadable record"),
            }
        }

        sort_by_recency(&mut documents);
        Ok(documents)
    }
}

/// Reads uploaded objects from a directory; locations are relative paths inside it.
pub struct FsObjectSource {
    root: PathBuf,
}

impl FsObjectSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectSource for FsObjectSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, StoreError> {
        let relative = Path::new(location);
        let escapes_root = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(StoreError::NotFound(location.to_string()));
        }

        match fs::read(self.root.join(relative)).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(location.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }
}
