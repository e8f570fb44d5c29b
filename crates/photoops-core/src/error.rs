//! Error types for the PhotoOps facet engine.
//!
//! Missing data is never an error: absent tags resolve to null fields.
//! The only failure a facet builder reports is malformed input, where a
//! fixed-shape value is present but has the wrong shape. Builds are pure, so a
//! malformed input fails identically on every attempt and must not be retried.

use std::path::PathBuf;
use thiserror::Error;

use crate::facets::FacetKind;

/// Top-level error type for PhotoOps operations.
#[derive(Error, Debug)]
pub enum PhotoOpsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Facet normalization errors
    #[error("Facet error: {0}")]
    Facet(#[from] FacetError),

    /// Source document loading errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while normalizing a tag tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacetError {
    /// A fixed-shape source value is present but has the wrong shape
    #[error("Malformed input for {facet} facet, field {field}: {message}")]
    MalformedInput {
        facet: FacetKind,
        field: &'static str,
        message: String,
    },

    /// A partition key could not be split into bucket and object key
    #[error("Invalid partition key: {0:?}")]
    InvalidPartitionKey(String),
}

impl FacetError {
    pub(crate) fn malformed(
        facet: FacetKind,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            facet,
            field,
            message: message.into(),
        }
    }
}

/// Errors raised while locating and loading source documents.
#[derive(Error, Debug)]
pub enum InputError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File exceeds size limit
    #[error("Document too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// File could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// File is not a valid source document
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Convenience type alias for PhotoOps results.
pub type Result<T> = std::result::Result<T, PhotoOpsError>;

/// Convenience type alias for facet builder results.
pub type FacetResult<T> = std::result::Result<T, FacetError>;
