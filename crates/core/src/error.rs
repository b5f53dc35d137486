use crate::models::DocumentFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("pdf parse error: {0}")]
    Pdf(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported content type {content_type:?} for {filename}")]
    UnsupportedType {
        content_type: String,
        filename: String,
    },

    #[error("{format} extraction failed: {source}")]
    Extraction {
        format: DocumentFormat,
        #[source]
        source: ExtractionError,
    },

    #[error("upload event has no object location")]
    MissingLocation,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl IngestError {
    /// Classification, parse, payload and argument failures are permanent for a given input.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            IngestError::UnsupportedType { .. }
                | IngestError::Extraction { .. }
                | IngestError::MissingLocation
                | IngestError::InvalidArgument(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("object not found: {0}")]
    NotFound(String),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
