use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use docsearch_core::{
    guess_content_type, ingest_folder_best_effort, DocumentStore, FsObjectSource, FsStore,
    IngestRequest, IngestionPipeline, OpenSearchStore, SearchEngine, SearchRequest, UploadEvent,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docsearch", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Document store backend
    #[arg(long, value_enum, env = "DOCSEARCH_STORE", default_value = "fs")]
    store: StoreKind,

    /// Directory holding the local document store
    #[arg(long, env = "DOCSEARCH_DATA_DIR", default_value = ".docsearch")]
    data_dir: PathBuf,

    /// OpenSearch base URL
    #[arg(long, env = "DOCSEARCH_OPENSEARCH_URL", default_value = "http://localhost:9200")]
    opensearch_url: String,

    /// OpenSearch index name
    #[arg(long, env = "DOCSEARCH_OPENSEARCH_INDEX", default_value = "documents")]
    opensearch_index: String,

    /// Maximum number of documents read per search scan
    #[arg(long, default_value = "10000")]
    page_size: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreKind {
    Fs,
    Opensearch,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and store a single file.
    Ingest {
        /// File to ingest.
        #[arg(long)]
        path: PathBuf,
        /// Declared content type; guessed from the extension when omitted.
        #[arg(long)]
        content_type: Option<String>,
        /// Store key; defaults to the path.
        #[arg(long)]
        id: Option<String>,
    },
    /// Ingest every file under a folder, skipping the ones that fail.
    IngestFolder {
        /// Folder that contains documents recursively.
        #[arg(long)]
        folder: PathBuf,
    },
    /// Replay an upload trigger payload (JSON) against objects under a root directory.
    Event {
        /// File holding the event JSON.
        #[arg(long)]
        payload: PathBuf,
        /// Directory event locations are resolved against.
        #[arg(long)]
        root: PathBuf,
    },
    /// Case-insensitive substring search, newest documents first.
    Search {
        /// Search query
        #[arg(long)]
        query: Option<String>,
        /// Print the response as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "docsearch boot"
    );

    let store = open_store(&cli).await?;

    match cli.command {
        Command::Ingest {
            path,
            content_type,
            id,
        } => {
            let pipeline = IngestionPipeline::new(store);
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let location = path.to_string_lossy().replace('\\', "/");
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&path));

            let mut request = IngestRequest::new(location, content_type, &bytes)
                .with_size(bytes.len() as u64);
            if let Some(id) = id {
                request = request.with_id(id);
            }

            let document = pipeline.ingest(request).await?;
            println!(
                "ingested id={} filename={} chars={} at {}",
                document.id,
                document.filename,
                document.content.chars().count(),
                document.uploaded_at.to_rfc3339()
            );
        }
        Command::IngestFolder { folder } => {
            let pipeline = IngestionPipeline::new(store);
            let report = ingest_folder_best_effort(&pipeline, &folder).await?;

            if !report.skipped_files.is_empty() {
                warn!(
                    "skipped_files={} for folder={}",
                    report.skipped_files.len(),
                    folder.display()
                );
                for skipped in &report.skipped_files {
                    warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped file");
                }
            }

            println!(
                "{} documents ingested, {} skipped, at {}",
                report.documents.len(),
                report.skipped_files.len(),
                Utc::now().to_rfc3339()
            );
        }
        Command::Event { payload, root } => {
            let event = read_event(&payload).await?;
            let pipeline = IngestionPipeline::new(store);
            let source = FsObjectSource::new(root);

            let document = pipeline.process_upload(event, &source).await?;
            println!("ingested id={} filename={}", document.id, document.filename);
        }
        Command::Search { query, json } => {
            let engine = SearchEngine::new(store);
            let response = engine.handle(SearchRequest { query }).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            println!("{} result(s)", response.results.len());
            for result in response.results {
                println!(
                    "[{}] {} ({}) uploaded={}",
                    result.id,
                    result.filename,
                    result.content_type,
                    result.uploaded_at.to_rfc3339()
                );
                println!("  {}", result.snippet);
            }
        }
    }

    Ok(())
}

async fn open_store(cli: &Cli) -> anyhow::Result<Arc<dyn DocumentStore + Send + Sync>> {
    let store: Arc<dyn DocumentStore + Send + Sync> = match cli.store {
        StoreKind::Fs => Arc::new(FsStore::new(&cli.data_dir)),
        StoreKind::Opensearch => {
            let store = OpenSearchStore::new(&cli.opensearch_url, &cli.opensearch_index)?
                .with_page_size(cli.page_size);
            store
                .ensure_index()
                .await
                .context("preparing the documents index")?;
            Arc::new(store)
        }
    };
    Ok(store)
}

async fn read_event(path: &Path) -> anyhow::Result<UploadEvent> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading event payload {}", path.display()))?;
    serde_json::from_slice(&raw).context("parsing upload event")
}
