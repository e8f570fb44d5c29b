//! Recursive search for image geometry anywhere in the tag tree.
//!
//! Width, length, orientation and compression live at different depths
//! depending on the container, and the same tag names are reused by embedded
//! thumbnails. The search walks the tree depth-first in declared order and
//! applies these rules to every scalar child of a node:
//!
//! 1. `image_width` / `image_length` count only when the sibling
//!    `subfile_type` is `"Full-resolution image"`. Thumbnail IFDs carry the
//!    same names with preview dimensions and must never win.
//! 2. `pixel_x_dimension` / `pixel_y_dimension` always count.
//! 3. `orientation` always counts.
//!
//! When a dimension rule matches, the sibling `compression` is captured too.
//! Every field is first-match-wins; the walk stops once all four are known.

use serde::Serialize;

use crate::tags;
use crate::tree::{Scalar, TagTree, TagValue};

/// Geometry resolved from a tag tree. Fields the search could not locate stay
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageGeometry {
    pub length: Option<u64>,
    pub width: Option<u64>,
    pub orientation: Option<Scalar>,
    pub compression: Option<Scalar>,
}

impl ImageGeometry {
    /// All four fields have been resolved.
    pub fn is_complete(&self) -> bool {
        self.length.is_some()
            && self.width.is_some()
            && self.orientation.is_some()
            && self.compression.is_some()
    }

    /// Best-effort JPEG signal from the resolved compression.
    ///
    /// Only a hint: many JPEG files omit compression entirely. Use the file
    /// classifier for the authoritative container type.
    pub fn looks_like_jpeg(&self) -> bool {
        self.compression
            .as_ref()
            .and_then(Scalar::as_text)
            .map(|c| c.to_ascii_uppercase().starts_with("JPEG"))
            .unwrap_or(false)
    }

    fn accept_dimension(&mut self, axis: Axis, value: &Scalar, node: &TagTree) {
        let Some(dimension) = value.as_u64() else {
            tracing::trace!("Ignoring non-integral {:?} dimension: {:?}", axis, value);
            return;
        };
        let slot = match axis {
            Axis::Width => &mut self.width,
            Axis::Length => &mut self.length,
        };
        if slot.is_none() {
            *slot = Some(dimension);
        }
        if self.compression.is_none() {
            self.compression = node.scalar(tags::COMPRESSION).cloned();
        }
    }

    fn accept_orientation(&mut self, value: &Scalar) {
        if self.orientation.is_none() {
            self.orientation = Some(value.clone());
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Width,
    Length,
}

/// Search the whole tree for image geometry. Never fails.
pub fn extract_geometry(tree: &TagTree) -> ImageGeometry {
    let mut found = ImageGeometry::default();
    visit(tree, &mut found);
    found
}

fn visit(node: &TagTree, found: &mut ImageGeometry) {
    let full_resolution = node.text(tags::SUBFILE_TYPE) == Some(tags::FULL_RESOLUTION_IMAGE);

    for (name, value) in node.iter() {
        if found.is_complete() {
            return;
        }
        match value {
            TagValue::Tree(child) => visit(child, found),
            TagValue::Scalar(scalar) => match name {
                tags::IMAGE_WIDTH if full_resolution => {
                    found.accept_dimension(Axis::Width, scalar, node)
                }
                tags::IMAGE_LENGTH if full_resolution => {
                    found.accept_dimension(Axis::Length, scalar, node)
                }
                tags::PIXEL_X_DIMENSION => found.accept_dimension(Axis::Width, scalar, node),
                tags::PIXEL_Y_DIMENSION => found.accept_dimension(Axis::Length, scalar, node),
                tags::ORIENTATION => found.accept_orientation(scalar),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumbnail_ifd() -> TagTree {
        TagTree::builder()
            .text("subfile_type", "Reduced-resolution image")
            .integer("image_width", 160)
            .integer("image_length", 120)
            .text("compression", "JPEG (old-style)")
            .build()
    }

    fn exif_ifd() -> TagTree {
        TagTree::builder()
            .integer("pixel_x_dimension", 4000)
            .integer("pixel_y_dimension", 3000)
            .text("compression", "Uncompressed")
            .build()
    }

    #[test]
    fn test_thumbnail_dimensions_are_ignored() {
        let tree = TagTree::builder()
            .subtree("ifd1", thumbnail_ifd())
            .subtree(
                "ifd0",
                TagTree::builder()
                    .text("orientation", "Horizontal (normal)")
                    .subtree("exif_ifd", exif_ifd())
                    .build(),
            )
            .build();

        let geometry = extract_geometry(&tree);
        assert_eq!(geometry.width, Some(4000));
        assert_eq!(geometry.length, Some(3000));
        assert_eq!(
            geometry.compression,
            Some(Scalar::Text("Uncompressed".into()))
        );
        assert_eq!(
            geometry.orientation,
            Some(Scalar::Text("Horizontal (normal)".into()))
        );
    }

    #[test]
    fn test_full_resolution_image_dimensions_accepted() {
        let tree = TagTree::builder()
            .subtree(
                "ifd0",
                TagTree::builder()
                    .text("subfile_type", "Full-resolution image")
                    .integer("image_width", 6048)
                    .integer("image_length", 4024)
                    .text("compression", "Uncompressed")
                    .integer("orientation", 1)
                    .build(),
            )
            .build();

        let geometry = extract_geometry(&tree);
        assert_eq!(geometry.width, Some(6048));
        assert_eq!(geometry.length, Some(4024));
        assert_eq!(geometry.orientation, Some(Scalar::Integer(1)));
        assert!(geometry.is_complete());
    }

    #[test]
    fn test_first_match_wins() {
        let tree = TagTree::builder()
            .subtree("first", exif_ifd())
            .subtree(
                "second",
                TagTree::builder()
                    .integer("pixel_x_dimension", 10)
                    .integer("pixel_y_dimension", 20)
                    .text("compression", "Other")
                    .build(),
            )
            .build();

        let geometry = extract_geometry(&tree);
        assert_eq!(geometry.width, Some(4000));
        assert_eq!(geometry.length, Some(3000));
        assert_eq!(
            geometry.compression,
            Some(Scalar::Text("Uncompressed".into()))
        );
    }

    #[test]
    fn test_later_scalar_does_not_override_earlier_subtree() {
        let tree = TagTree::builder()
            .subtree("exif_ifd", exif_ifd())
            .integer("pixel_x_dimension", 1)
            .build();

        assert_eq!(extract_geometry(&tree).width, Some(4000));
    }

    #[test]
    fn test_empty_tree_yields_nulls() {
        let geometry = extract_geometry(&TagTree::new());
        assert_eq!(geometry, ImageGeometry::default());
        assert!(!geometry.looks_like_jpeg());
    }

    #[test]
    fn test_non_integral_dimension_keeps_searching() {
        let tree = TagTree::builder()
            .subtree(
                "a",
                TagTree::builder().text("pixel_x_dimension", "wide").build(),
            )
            .subtree(
                "b",
                TagTree::builder().integer("pixel_x_dimension", 800).build(),
            )
            .build();

        assert_eq!(extract_geometry(&tree).width, Some(800));
    }

    #[test]
    fn test_orientation_without_dimensions() {
        let tree = TagTree::builder()
            .subtree("ifd0", TagTree::builder().integer("orientation", 6).build())
            .build();
        let geometry = extract_geometry(&tree);
        assert_eq!(geometry.orientation, Some(Scalar::Integer(6)));
        assert!(geometry.width.is_none());
        assert!(geometry.compression.is_none());
    }

    #[test]
    fn test_looks_like_jpeg() {
        let tree = TagTree::builder()
            .integer("pixel_x_dimension", 4000)
            .text("compression", "JPEG (old-style)")
            .build();
        assert!(extract_geometry(&tree).looks_like_jpeg());
    }

    #[test]
    fn test_idempotent() {
        let tree = TagTree::builder()
            .subtree("ifd1", thumbnail_ifd())
            .subtree("exif_ifd", exif_ifd())
            .build();
        assert_eq!(extract_geometry(&tree), extract_geometry(&tree));
    }
}
