//! The `photoops facets` command for building facet records.

mod batch;
mod setup;
pub mod types;

pub use types::OutputFormat;

use clap::Args;
use photoops_core::input::DocumentLoader;
use photoops_core::{FacetEngine, FacetKind, OutputFormat as CoreOutputFormat};
use std::path::PathBuf;

use batch::process_batch;
use setup::setup_engine;

/// Arguments for the `facets` command.
#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Source document (JSON) or directory of documents
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Facets to build, comma-separated (defaults to the configured set)
    #[arg(long = "facet", value_delimiter = ',')]
    pub facets: Vec<FacetKind>,

    /// Build every facet, including the raw exif record
    #[arg(long, conflicts_with = "facets")]
    pub all: bool,

    /// Keep the vendor maker note in the exif record
    #[arg(long)]
    pub keep_maker_note: bool,

    /// Skip documents whose partition key is already in the output file
    #[arg(long, requires = "output")]
    pub skip_existing: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, env = "PHOTOOPS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Values match the clap annotations above.
impl Default for FacetsArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            format: None,
            facets: Vec::new(),
            all: false,
            keep_maker_note: false,
            skip_existing: false,
            config: None,
        }
    }
}

/// Everything a run needs, assembled by setup_engine().
pub(crate) struct FacetsContext {
    pub engine: FacetEngine,
    pub loader: DocumentLoader,
    pub output_format: CoreOutputFormat,
    pub pretty: bool,
}

/// Execute the facets command.
pub async fn execute(args: FacetsArgs) -> anyhow::Result<()> {
    let ctx = setup_engine(&args)?;

    let documents = photoops_core::DocumentDiscovery::new().discover(&args.input);
    if documents.is_empty() {
        tracing::warn!("No source documents found at {:?}", args.input);
        return Ok(());
    }
    tracing::info!(
        "Found {} document(s), building {} facet(s) each",
        documents.len(),
        ctx.engine.enabled().len()
    );

    process_batch(ctx, &args, documents).await
}
