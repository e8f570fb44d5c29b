//! Core data types for the PhotoOps facet engine.
//!
//! A source document is one decoder output plus the object metadata the
//! engine needs: where the object lives, how big it is, and what the
//! container sniffer thought it was.

use serde::{Deserialize, Serialize};

use crate::record::PartitionKey;
use crate::tree::TagTree;

/// The unit of work for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Storage bucket holding the object
    pub bucket: String,

    /// Object key within the bucket
    pub key: String,

    /// Object size in bytes
    #[serde(default)]
    pub size: u64,

    /// Coarse container type guess ("jpg", "tif", ...)
    #[serde(default)]
    pub container: Option<String>,

    /// Decoded tag tree; an empty tree when the decoder found nothing
    #[serde(default)]
    pub exif: TagTree,
}

impl SourceDocument {
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(&self.bucket, &self.key)
    }
}

/// Statistics for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunStats {
    /// Documents turned into facet sets
    pub succeeded: usize,

    /// Documents that failed to load or build
    pub failed: usize,

    /// Records written
    pub records: usize,

    /// Documents per second
    pub documents_per_second: f64,

    /// Total run time in seconds
    pub total_seconds: f64,
}

impl RunStats {
    /// Fill in the timing fields from the elapsed wall time.
    pub fn finish(&mut self, elapsed: std::time::Duration) {
        self.total_seconds = elapsed.as_secs_f64();
        self.documents_per_second = if self.total_seconds > 0.0 {
            self.succeeded as f64 / self.total_seconds
        } else {
            0.0
        };
    }
}
