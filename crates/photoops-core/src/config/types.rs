//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::facets::FacetKind;

/// Which facets the engine builds for each source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetsConfig {
    /// Facet kinds to build, in output order
    pub enabled: Vec<FacetKind>,
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            enabled: vec![
                FacetKind::Camera,
                FacetKind::Lens,
                FacetKind::Location,
                FacetKind::Image,
                FacetKind::File,
            ],
        }
    }
}

/// File/container classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Extra extensions that mark a TIFF container as plain TIFF rather than
    /// RAW; `tif` and `tiff` always do
    pub tiff_extensions: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tiff_extensions: vec!["tif".to_string(), "tiff".to_string()],
        }
    }
}

/// Raw EXIF record settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExifConfig {
    /// Drop `ifd0.exif_ifd.maker_note` before emitting the exif record
    pub strip_maker_note: bool,
}

impl Default for ExifConfig {
    fn default() -> Self {
        Self {
            strip_maker_note: true,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum source document size in megabytes
    pub max_document_size_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_document_size_mb: 16,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl"
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
