//! PhotoOps Core - EXIF normalization library.
//!
//! PhotoOps takes the tag tree a metadata decoder produced for one photo and
//! turns it into a handful of typed, flat facets that are easy to index:
//! camera, lens, location, image, file, plus the raw tree itself.
//!
//! # Architecture
//!
//! The engine is a set of pure transforms with no storage dependencies:
//!
//! ```text
//! Source document → Tag tree → Facet builders → Keyed records → JSON
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use photoops_core::{Config, FacetEngine, SourceDocument};
//!
//! fn main() -> photoops_core::Result<()> {
//!     let config = Config::load()?;
//!     let engine = FacetEngine::new(&config);
//!
//!     let doc: SourceDocument = serde_json::from_str(&std::fs::read_to_string("doc.json")?)?;
//!     for record in engine.build(&doc)?.records()? {
//!         println!("{record}");
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod engine;
pub mod error;
pub mod facets;
pub mod input;
pub mod output;
pub mod record;
pub mod tags;
pub mod tree;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use engine::{FacetEngine, FacetSet};
pub use error::{ConfigError, FacetError, FacetResult, InputError, PhotoOpsError, Result};
pub use facets::{Facet, FacetKind};
pub use input::{DocumentDiscovery, DocumentLoader};
pub use output::{OutputFormat, OutputWriter};
pub use record::{FacetRecord, PartitionKey};
pub use tree::{Scalar, TagTree, TagValue};
pub use types::{RunStats, SourceDocument};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
