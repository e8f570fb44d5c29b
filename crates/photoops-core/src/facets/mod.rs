//! Facet builders: pure transforms from a tag tree to typed records.
//!
//! - **geometry**: depth-first search for image dimensions, guarded against
//!   thumbnail values
//! - **file**: container/extension classification
//! - **camera**, **lens**, **location**, **image**: fixed-path facet builders
//! - **exif**: the whole tree as a record, minus the vendor maker note
//!
//! Every builder takes the tree by shared reference and never mutates it.

pub mod camera;
pub mod exif;
pub mod file;
pub mod geometry;
pub mod image;
pub mod lens;
pub mod location;

pub use camera::{build_camera, CameraFacet};
pub use exif::ExifItem;
pub use file::{FileClassifier, FileFacet, FileType};
pub use geometry::{extract_geometry, ImageGeometry};
pub use image::{build_image, ImageFacet};
pub use lens::{build_lens, LensFacet};
pub use location::{build_location, LocationFacet};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of record the engine can produce for one source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Camera,
    Lens,
    Location,
    Image,
    File,
    Exif,
}

impl FacetKind {
    /// All kinds, in the order the engine emits them.
    pub const ALL: [FacetKind; 6] = [
        FacetKind::Camera,
        FacetKind::Lens,
        FacetKind::Location,
        FacetKind::Image,
        FacetKind::File,
        FacetKind::Exif,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKind::Camera => "camera",
            FacetKind::Lens => "lens",
            FacetKind::Location => "location",
            FacetKind::Image => "image",
            FacetKind::File => "file",
            FacetKind::Exif => "exif",
        }
    }

    /// Sort key literal under which the persistence layer stores this facet.
    pub fn sort_key(&self) -> &'static str {
        match self {
            FacetKind::Camera => "camera#v0",
            FacetKind::Lens => "lens#v0",
            FacetKind::Location => "location#v0",
            FacetKind::Image => "image#v0",
            FacetKind::File => "file#v0",
            FacetKind::Exif => "exif#v0",
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FacetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown facet kind: {s}"))
    }
}

/// One built facet of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Facet {
    Camera(CameraFacet),
    Lens(LensFacet),
    Location(LocationFacet),
    Image(ImageFacet),
    File(FileFacet),
    Exif(ExifItem),
}

impl Facet {
    pub fn kind(&self) -> FacetKind {
        match self {
            Facet::Camera(_) => FacetKind::Camera,
            Facet::Lens(_) => FacetKind::Lens,
            Facet::Location(_) => FacetKind::Location,
            Facet::Image(_) => FacetKind::Image,
            Facet::File(_) => FacetKind::File,
            Facet::Exif(_) => FacetKind::Exif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_keys() {
        assert_eq!(FacetKind::Camera.sort_key(), "camera#v0");
        assert_eq!(FacetKind::Lens.sort_key(), "lens#v0");
        assert_eq!(FacetKind::Location.sort_key(), "location#v0");
        assert_eq!(FacetKind::Image.sort_key(), "image#v0");
        assert_eq!(FacetKind::File.sort_key(), "file#v0");
        assert_eq!(FacetKind::Exif.sort_key(), "exif#v0");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("lens".parse::<FacetKind>(), Ok(FacetKind::Lens));
        assert!("GPS".parse::<FacetKind>().is_err());
        assert_eq!("Location".parse::<FacetKind>(), Ok(FacetKind::Location));
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&FacetKind::Image).unwrap();
        assert_eq!(json, "\"image\"");
        let parsed: FacetKind = serde_json::from_str("\"file\"").unwrap();
        assert_eq!(parsed, FacetKind::File);
    }
}
