//! Keyed records handed to the persistence layer.
//!
//! Every facet is stored as one flat item: the partition key identifies the
//! source object (`bucket#key`), the sort key names the facet and its schema
//! version (`lens#v0`). The engine only shapes these records; writing them is
//! the caller's job.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FacetError, FacetResult};
use crate::facets::FacetKind;

/// Partition key for a source object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
    pub fn new(bucket: &str, key: &str) -> Self {
        Self(format!("{bucket}#{key}"))
    }

    /// Split a rendered partition key back into bucket and object key.
    ///
    /// Splits on the first `#`; object keys may themselves contain `#`.
    pub fn parse(raw: &str) -> FacetResult<(String, String)> {
        match raw.split_once('#') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                Ok((bucket.to_string(), key.to_string()))
            }
            _ => Err(FacetError::InvalidPartitionKey(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A facet wrapped with its keys; the facet's fields are flattened alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetRecord<T> {
    pub pk: String,
    pub sk: String,
    #[serde(flatten)]
    pub facet: T,
}

impl<T> FacetRecord<T> {
    pub fn new(pk: &PartitionKey, kind: FacetKind, facet: T) -> Self {
        Self {
            pk: pk.as_str().to_string(),
            sk: kind.sort_key().to_string(),
            facet,
        }
    }
}
