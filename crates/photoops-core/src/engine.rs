//! Engine orchestration - builds every enabled facet for a source document.

use std::time::Instant;

use serde_json::Value;

use crate::config::Config;
use crate::error::FacetResult;
use crate::facets::{
    build_camera, build_image, build_lens, build_location, ExifItem, Facet, FacetKind,
    FileClassifier,
};
use crate::record::{FacetRecord, PartitionKey};
use crate::types::SourceDocument;

/// Builds facet sets from source documents.
///
/// Holds no per-document state, so one engine can be shared across tasks.
#[derive(Debug, Clone)]
pub struct FacetEngine {
    enabled: Vec<FacetKind>,
    classifier: FileClassifier,
    strip_maker_note: bool,
}

impl Default for FacetEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl FacetEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.facets.enabled.clone(),
            classifier: FileClassifier::new(config.classifier.clone()),
            strip_maker_note: config.exif.strip_maker_note,
        }
    }

    /// Restrict the engine to a subset of facet kinds, keeping their order.
    pub fn with_facets(mut self, kinds: Vec<FacetKind>) -> Self {
        self.enabled = kinds;
        self
    }

    pub fn enabled(&self) -> &[FacetKind] {
        &self.enabled
    }

    /// Build every enabled facet for one document.
    ///
    /// Fails on the first malformed facet; no partial set is returned.
    pub fn build(&self, doc: &SourceDocument) -> FacetResult<FacetSet> {
        let start = Instant::now();
        let partition_key = doc.partition_key();
        tracing::debug!("Building facets: {}", partition_key);

        let mut facets = Vec::with_capacity(self.enabled.len());
        for kind in &self.enabled {
            let facet_start = Instant::now();
            let facet = self.build_one(*kind, doc).inspect_err(|e| {
                tracing::warn!("{}: {}", partition_key, e);
            })?;
            tracing::trace!("  {}: {:?}", kind, facet_start.elapsed());
            facets.push(facet);
        }

        tracing::debug!(
            "Built {} facets for {} in {:?}",
            facets.len(),
            partition_key,
            start.elapsed()
        );

        Ok(FacetSet {
            partition_key,
            facets,
        })
    }

    fn build_one(&self, kind: FacetKind, doc: &SourceDocument) -> FacetResult<Facet> {
        let tree = &doc.exif;
        Ok(match kind {
            FacetKind::Camera => Facet::Camera(build_camera(tree)),
            FacetKind::Lens => Facet::Lens(build_lens(tree)?),
            FacetKind::Location => Facet::Location(build_location(tree)),
            FacetKind::Image => Facet::Image(build_image(tree)),
            FacetKind::File => Facet::File(self.classifier.classify(
                &doc.key,
                doc.container.as_deref(),
                doc.size,
            )),
            FacetKind::Exif => Facet::Exif(ExifItem::from_tree(tree, self.strip_maker_note)),
        })
    }
}

/// The facets built for one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetSet {
    pub partition_key: PartitionKey,
    pub facets: Vec<Facet>,
}

impl FacetSet {
    /// Find the facet of the given kind, if it was built.
    pub fn get(&self, kind: FacetKind) -> Option<&Facet> {
        self.facets.iter().find(|f| f.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Keyed, flattened records ready for a key/value store.
    pub fn records(&self) -> serde_json::Result<Vec<Value>> {
        self.facets
            .iter()
            .map(|facet| {
                serde_json::to_value(FacetRecord::new(&self.partition_key, facet.kind(), facet))
            })
            .collect()
    }
}
