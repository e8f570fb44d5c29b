//! The decoded tag tree itself, stored as a record alongside the facets.

use serde::{Deserialize, Serialize};

use crate::tags::{EXIF_IFD, IFD0, MAKER_NOTE};
use crate::tree::TagTree;

/// Raw EXIF record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExifItem {
    pub exif: TagTree,
}

impl ExifItem {
    /// Wrap a copy of the tree, optionally pruning `ifd0.exif_ifd.maker_note`.
    ///
    /// Vendor maker notes embedded in the EXIF sub-IFD can run to tens of
    /// kilobytes of opaque data, which record stores tend to reject.
    pub fn from_tree(tree: &TagTree, strip_maker_note: bool) -> Self {
        let exif = if strip_maker_note {
            tree.pruned(&[IFD0, EXIF_IFD, MAKER_NOTE])
        } else {
            tree.clone()
        };
        Self { exif }
    }
}
