use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use std::fmt;

/// Name of the collection documents are written to and scanned from.
pub const DOCUMENTS_COLLECTION: &str = "documents";

/// Auxiliary attributes forwarded to the store untouched.
pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Html,
    Markdown,
    PlainText,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Pdf,
        DocumentFormat::Html,
        DocumentFormat::Markdown,
        DocumentFormat::PlainText,
    ];
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Html => "html",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::PlainText => "text",
        };
        f.write_str(name)
    }
}

/// Payload of the trigger fired when a raw object lands in upload storage.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadEvent {
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub object_id: Option<String>,
    pub size: Option<u64>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub snippet: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetOptions {
    /// Characters of context kept on each side of the match.
    pub context_chars: usize,
    /// Characters kept from the start of the content when nothing matches.
    pub fallback_chars: usize,
    pub marker: &'static str,
    /// Append the marker to the fallback snippet even when nothing was cut.
    pub always_mark_fallback: bool,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            context_chars: 75,
            fallback_chars: 150,
            marker: "...",
            always_mark_fallback: true,
        }
    }
}
