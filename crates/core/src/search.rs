use crate::snippet::{contains_ignore_case, snippet_with};
use crate::traits::DocumentStore;
use crate::{Document, SearchRequest, SearchResponse, SearchResult, SnippetOptions, StoreError};
use tracing::debug;

/// Full-scan substring search over the document store, newest documents first.
///
/// Every call reads the whole collection; there is no index.
pub struct SearchEngine<S> {
    store: S,
    snippet_options: SnippetOptions,
}

impl<S> SearchEngine<S>
where
    S: DocumentStore + Send + Sync,
{
    pub fn new(store: S) -> Self {
        Self::with_snippet_options(store, SnippetOptions::default())
    }

    pub fn with_snippet_options(store: S, snippet_options: SnippetOptions) -> Self {
        Self {
            store,
            snippet_options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Absent or blank queries return no results without reading the store.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<SearchResult>, StoreError> {
        let Some(query) = query.filter(|query| !query.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let documents = self.store.list_by_recency().await?;
        let scanned = documents.len();

        let results: Vec<SearchResult> = documents
            .into_iter()
            .filter(|document| contains_ignore_case(&document.content, query))
            .map(|document| self.to_result(document, query))
            .collect();

        debug!(query, scanned, matched = results.len(), "search scan finished");
        Ok(results)
    }

    pub async fn handle(&self, request: SearchRequest) -> Result<SearchResponse, StoreError> {
        let results = self.search(request.query.as_deref()).await?;
        Ok(SearchResponse { results })
    }

    fn to_result(&self, document: Document, query: &str) -> SearchResult {
        SearchResult {
            snippet: snippet_with(&document.content, query, &self.snippet_options),
            id: document.id,
            filename: document.filename,
            content_type: document.content_type,
            uploaded_at: document.uploaded_at,
        }
    }
}
