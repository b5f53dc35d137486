use crate::registry::ExtractorRegistry;
use crate::traits::{DocumentStore, ObjectSource};
use crate::{Document, IngestError, Metadata, UploadEvent};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Source of the `uploadedAt` stamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One raw object to ingest.
#[derive(Debug, Clone)]
pub struct IngestRequest<'a> {
    pub id: String,
    pub location: String,
    pub content_type: String,
    pub bytes: &'a [u8],
    pub size: Option<u64>,
    pub updated: Option<DateTime<Utc>>,
}

impl<'a> IngestRequest<'a> {
    /// Request keyed by its location, without size or timestamp hints.
    pub fn new(location: impl Into<String>, content_type: impl Into<String>, bytes: &'a [u8]) -> Self {
        let location = location.into();
        Self {
            id: location.clone(),
            location,
            content_type: content_type.into(),
            bytes,
            size: None,
            updated: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }
}

/// Final path segment of an object location; empty when the location ends in `/`.
pub fn filename_from_location(location: &str) -> &str {
    location.rsplit('/').next().unwrap_or_default()
}

pub struct IngestionPipeline<S> {
    registry: ExtractorRegistry,
    store: S,
    clock: Box<dyn Clock>,
}

impl<S> IngestionPipeline<S>
where
    S: DocumentStore + Send + Sync,
{
    pub fn new(store: S) -> Self {
        Self::with_parts(ExtractorRegistry::default(), store, SystemClock)
    }

    pub fn with_parts(registry: ExtractorRegistry, store: S, clock: impl Clock + 'static) -> Self {
        Self {
            registry,
            store,
            clock: Box::new(clock),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Extract, build and upsert one document. Nothing is written unless every step succeeds.
    pub async fn ingest(&self, request: IngestRequest<'_>) -> Result<Document, IngestError> {
        let filename = filename_from_location(&request.location);

        let (format, extractor) = match self.registry.resolve(&request.content_type, filename) {
            Ok(resolved) => resolved,
            Err(unsupported) => {
                warn!(
                    id = %request.id,
                    location = %request.location,
                    content_type = %request.content_type,
                    "unsupported file type"
                );
                return Err(unsupported);
            }
        };

        let content = extractor.extract(request.bytes).map_err(|source| {
            error!(
                id = %request.id,
                location = %request.location,
                %format,
                error = %source,
                "text extraction failed"
            );
            IngestError::Extraction { format, source }
        })?;

        let mut metadata = Metadata::new();
        metadata.insert("size".to_string(), request.size.map_or(Value::Null, Value::from));
        metadata.insert(
            "updated".to_string(),
            request
                .updated
                .map_or(Value::Null, |updated| Value::String(updated.to_rfc3339())),
        );

        let document = Document {
            id: request.id,
            filename: filename.to_string(),
            content_type: request.content_type,
            content,
            metadata,
            uploaded_at: self.clock.now(),
        };

        if let Err(failure) = self.store.put(&document).await {
            error!(id = %document.id, error = %failure, "document write failed");
            return Err(failure.into());
        }

        info!(
            id = %document.id,
            location = %request.location,
            %format,
            chars = document.content.chars().count(),
            "document ingested"
        );
        Ok(document)
    }

    /// Handle an upload trigger: validate the payload, fetch the object, ingest it.
    pub async fn process_upload<O>(
        &self,
        event: UploadEvent,
        source: &O,
    ) -> Result<Document, IngestError>
    where
        O: ObjectSource + Send + Sync,
    {
        let Some(location) = event.location.filter(|location| !location.is_empty()) else {
            error!("upload event has no object location");
            return Err(IngestError::MissingLocation);
        };

        let id = event
            .object_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| location.clone());
        let bytes = source.fetch(&location).await.map_err(|failure| {
            error!(%id, %location, error = %failure, "object download failed");
            IngestError::from(failure)
        })?;

        let mut request = IngestRequest::new(location, event.content_type.unwrap_or_default(), &bytes)
            .with_id(id);
        request.size = event.size;
        request.updated = event.updated;

        self.ingest(request).await
    }
}

pub fn discover_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if entry.file_type().is_file() {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

/// Declared type for a local file, guessed from its extension.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string()
}

pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

pub struct IngestionReport {
    pub documents: Vec<Document>,
    pub skipped_files: Vec<SkippedFile>,
}

/// Ingest every file under `folder`, keyed by its `/`-separated path relative to the folder.
/// Per-file failures are collected instead of aborting the run.
pub async fn ingest_folder_best_effort<S>(
    pipeline: &IngestionPipeline<S>,
    folder: &Path,
) -> Result<IngestionReport, IngestError>
where
    S: DocumentStore + Send + Sync,
{
    let files = discover_files(folder);

    if files.is_empty() {
        return Err(IngestError::InvalidArgument(format!(
            "no files found in {}",
            folder.display()
        )));
    }

    let mut documents = Vec::new();
    let mut skipped_files = Vec::new();

    for path in files {
        match ingest_local_file(pipeline, folder, &path).await {
            Ok(document) => documents.push(document),
            Err(error) => skipped_files.push(SkippedFile {
                path,
                reason: error.to_string(),
            }),
        }
    }

    Ok(IngestionReport {
        documents,
        skipped_files,
    })
}

async fn ingest_local_file<S>(
    pipeline: &IngestionPipeline<S>,
    folder: &Path,
    path: &Path,
) -> Result<Document, IngestError>
where
    S: DocumentStore + Send + Sync,
{
    let bytes = tokio::fs::read(path).await?;
    let file_metadata = tokio::fs::metadata(path).await?;
    let location = path
        .strip_prefix(folder)
        .unwrap_or(path)
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let mut request = IngestRequest::new(location, guess_content_type(path), &bytes)
        .with_size(file_metadata.len());
    if let Ok(modified) = file_metadata.modified() {
        request = request.with_updated(modified.into());
    }

    pipeline.ingest(request).await
}
