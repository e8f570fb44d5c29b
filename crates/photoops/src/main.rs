//! PhotoOps CLI - turn decoded photo metadata into facet records.
//!
//! PhotoOps reads source documents (a decoder's tag tree plus object
//! metadata, as JSON) and writes the camera, lens, location, image, file and
//! exif records a key/value store would hold for each photo.
//!
//! # Usage
//!
//! ```bash
//! # Build the default facets for one document
//! photoops facets doc.json
//!
//! # Build selected facets for a directory of documents
//! photoops facets ./docs/ --facet lens,file --format jsonl --output records.jsonl
//!
//! # Classify an object key
//! photoops classify 2021/06/DSC_0042.NEF --container tif
//!
//! # View configuration
//! photoops config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// PhotoOps - normalize decoded photo metadata into typed facet records.
#[derive(Parser, Debug)]
#[command(name = "photoops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build facet records from source documents
    Facets(cli::facets::FacetsArgs),

    /// Classify a single object key
    Classify(cli::classify::ClassifyArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match photoops_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `photoops config check`."
            );
            photoops_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("PhotoOps v{}", photoops_core::VERSION);

    match cli.command {
        Commands::Facets(args) => cli::facets::execute(args).await,
        Commands::Classify(args) => cli::classify::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
