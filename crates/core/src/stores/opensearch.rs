use crate::traits::DocumentStore;
use crate::{Document, StoreError, DOCUMENTS_COLLECTION};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

const BACKEND: &str = "opensearch";

/// Upper bound on documents returned by one recency scan.
pub const DEFAULT_PAGE_SIZE: usize = 10_000;

pub struct OpenSearchStore {
    client: Arc<Client>,
    endpoint: Url,
    index_name: String,
    page_size: usize,
}

impl OpenSearchStore {
    pub fn new(endpoint: &str, index_name: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            client: Arc::new(Client::new()),
            endpoint: Url::parse(endpoint)?,
            index_name: index_name.into(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Store bound to the conventional `documents` index.
    pub fn documents(endpoint: &str) -> Result<Self, StoreError> {
        Self::new(endpoint, DOCUMENTS_COLLECTION)
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::BackendResponse {
                backend: BACKEND.to_string(),
                details: format!("endpoint cannot be a base url: {}", self.endpoint),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn ensure_index(&self) -> Result<(), StoreError> {
        let index_url = self.url(&[&self.index_name])?;
        let response = self.client.head(index_url.clone()).send().await?;

        if response.status() == StatusCode::OK {
            return Ok(());
        }

        if !response.status().is_client_error() {
            return Err(StoreError::BackendResponse {
                backend: BACKEND.to_string(),
                details: response.status().to_string(),
            });
        }

        let response = self
            .client
            .put(index_url)
            .json(&json!({
                "settings": {
                    "number_of_shards": 1,
                    "number_of_replicas": 0
                },
                "mappings": {
                    "properties": {
                        "id": {"type": "keyword"},
                        "filename": {"type": "keyword"},
                        "contentType": {"type": "keyword"},
                        "content": {"type": "text"},
                        "metadata": {"type": "object", "enabled": false},
                        "uploadedAt": {"type": "date"}
                    }
                }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::BackendResponse {
                backend: BACKEND.to_string(),
                details: format!("index setup failed with {}", response.status()),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for OpenSearchStore {
    async fn put(&self, document: &Document) -> Result<(), StoreError> {
        let mut url = self.url(&[&self.index_name, "_doc", &document.id])?;
        url.query_pairs_mut().append_pair("refresh", "wait_for");

        let response = self.client.put(url).json(document).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::BackendResponse {
                backend: BACKEND.to_string(),
                details: response.status().to_string(),
            });
        }
        Ok(())
    }

    async fn list_by_recency(&self) -> Result<Vec<Document>, StoreError> {
        let body = json!({
            "size": self.page_size,
            "query": {"match_all": {}},
            "sort": [
                {"uploadedAt": {"order": "desc"}},
                {"id": {"order": "asc"}}
            ]
        });

        let response = self
            .client
            .post(self.url(&[&self.index_name, "_search"])?)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            return Err(StoreError::BackendResponse {
                backend: BACKEND.to_string(),
                details: response.status().to_string(),
            });
        }

        let response_json: Value = response.json().await?;
        documents_from_hits(&response_json)
    }
}

fn documents_from_hits(response: &Value) -> Result<Vec<Document>, StoreError> {
    let hits = response
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    hits.into_iter()
        .filter_map(|mut raw| raw.get_mut("_source").map(Value::take))
        .map(|source| serde_json::from_value(source).map_err(StoreError::from))
        .collect()
}
