//! Camera identity facet.

use serde::{Deserialize, Serialize};

use crate::tags::{self, IFD0, MAKER_NOTE_PATH};
use crate::tree::{Scalar, TagTree};

/// Camera facet record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraFacet {
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
    pub serial_number: Option<String>,
}

/// Copy camera identity from its canonical location in `ifd0`.
pub fn build_camera(tree: &TagTree) -> CameraFacet {
    let maker_note = tree.subtree_at(&MAKER_NOTE_PATH);

    CameraFacet {
        make: text_at(tree, tags::MAKE),
        model: text_at(tree, tags::MODEL),
        software: text_at(tree, tags::SOFTWARE),
        serial_number: maker_note
            .and_then(|note| note.scalar(tags::SERIAL_NUMBER))
            .and_then(Scalar::to_text),
    }
}

fn text_at(tree: &TagTree, name: &str) -> Option<String> {
    tree.scalar_at(&[IFD0, name]).and_then(Scalar::to_text)
}
