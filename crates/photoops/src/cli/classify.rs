//! The `photoops classify` command: file facet for a single object key.

use clap::Args;
use photoops_core::facets::FileClassifier;
use photoops_core::Config;

/// Arguments for the `classify` command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Object key (path or file name)
    #[arg(required = true)]
    pub key: String,

    /// Container type reported by the sniffer (jpg, tif, ...)
    #[arg(short, long)]
    pub container: Option<String>,

    /// Object size in bytes
    #[arg(short, long, default_value = "0")]
    pub size: u64,
}

/// Execute the classify command.
pub async fn execute(args: ClassifyArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let classifier = FileClassifier::new(config.classifier);
    let facet = classifier.classify(&args.key, args.container.as_deref(), args.size);

    tracing::debug!("Classified {:?} as {}", args.key, facet.file_type.as_str());
    println!("{}", serde_json::to_string_pretty(&facet)?);
    Ok(())
}
