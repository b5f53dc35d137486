//! Document ingestion and substring search.
//!
//! Uploads (PDF, HTML, Markdown, plain text) are dispatched on their declared
//! content type to an extractor, turned into a [`Document`] and upserted into a
//! [`DocumentStore`]. [`SearchEngine`] scans the store newest-first for a
//! case-insensitive substring and returns [`SearchResult`]s with snippets.

pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod registry;
pub mod search;
pub mod snippet;
pub mod stores;
pub mod traits;

pub use error::{ExtractionError, IngestError, StoreError};
pub use extractor::{
    HtmlExtractor, LopdfExtractor, MarkdownExtractor, PageText, PlainTextExtractor, TextExtractor,
};
pub use ingest::{
    discover_files, filename_from_location, guess_content_type, ingest_folder_best_effort, Clock,
    IngestRequest, IngestionPipeline, IngestionReport, SkippedFile, SystemClock,
};
pub use models::{
    Document, DocumentFormat, Metadata, SearchRequest, SearchResponse, SearchResult,
    SnippetOptions, UploadEvent, DOCUMENTS_COLLECTION,
};
pub use registry::ExtractorRegistry;
pub use search::SearchEngine;
pub use snippet::{contains_ignore_case, snippet, snippet_with};
pub use stores::{FsObjectSource, FsStore, MemoryStore, OpenSearchStore};
pub use traits::{DocumentStore, ObjectSource};
