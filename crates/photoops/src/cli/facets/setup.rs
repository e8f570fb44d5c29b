//! Engine setup: config loading and CLI overrides.

use photoops_core::input::DocumentLoader;
use photoops_core::{Config, FacetEngine, FacetKind, OutputFormat as CoreOutputFormat};

use super::{FacetsArgs, FacetsContext};

/// Validate input, load config, and assemble everything needed for a run.
pub fn setup_engine(args: &FacetsArgs) -> anyhow::Result<FacetsContext> {
    if !args.input.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, args);

    let output_format = match args.format {
        Some(format) => format.into(),
        None => CoreOutputFormat::parse(&config.output.format).unwrap_or(CoreOutputFormat::Json),
    };

    Ok(FacetsContext {
        engine: FacetEngine::new(&config),
        loader: DocumentLoader::new(config.limits.clone()),
        output_format,
        pretty: config.output.pretty,
    })
}

/// Fold command-line flags into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &FacetsArgs) {
    if args.all {
        config.facets.enabled = FacetKind::ALL.to_vec();
    } else if !args.facets.is_empty() {
        let mut enabled = Vec::with_capacity(args.facets.len());
        for kind in &args.facets {
            if !enabled.contains(kind) {
                enabled.push(*kind);
            }
        }
        config.facets.enabled = enabled;
    }
    if args.keep_maker_note {
        config.exif.strip_maker_note = false;
    }
}
