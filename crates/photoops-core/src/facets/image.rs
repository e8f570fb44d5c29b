//! Image geometry and exposure facet.
//!
//! Geometry comes from the recursive search in [`super::geometry`]. Exposure
//! and capture settings are copied from `ifd0.exif_ifd` as decoded, with no
//! attempt to reconcile the several places a date can live.

use serde::{Deserialize, Serialize};

use crate::facets::geometry::extract_geometry;
use crate::tags::{self, EXIF_IFD_PATH, IFD0, MAKER_NOTE_PATH};
use crate::tree::{Scalar, TagTree};

/// Image facet record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFacet {
    pub length: Option<u64>,
    pub width: Option<u64>,
    pub orientation: Option<Scalar>,
    pub compression: Option<Scalar>,
    pub date_time: Option<String>,
    pub date_time_offset: Option<String>,
    pub auto_focus: bool,
    pub exposure_mode: Option<Scalar>,
    pub exposure_program: Option<Scalar>,
    pub exposure_time: Option<Scalar>,
    pub flash: Option<Scalar>,
    pub f_number: Option<Scalar>,
    pub focal_length: Option<Scalar>,
    pub focal_length_in_35mm_film: Option<Scalar>,
    pub photographic_sensitivity: Option<Scalar>,
    pub sensitivity_type: Option<Scalar>,
    pub light_source: Option<Scalar>,
    pub metering_mode: Option<Scalar>,
    pub sensing_method: Option<Scalar>,
    pub contrast: Option<Scalar>,
    pub gain_control: Option<Scalar>,
    pub saturation: Option<Scalar>,
    pub sharpness: Option<Scalar>,
    pub subject_distance_range: Option<Scalar>,
    pub white_balance: Option<Scalar>,
}

/// Build the image facet. Never fails.
pub fn build_image(tree: &TagTree) -> ImageFacet {
    let geometry = extract_geometry(tree);
    let exif = tree.subtree_at(&EXIF_IFD_PATH);
    let field = |name: &str| exif.and_then(|e| e.scalar(name)).cloned();

    // Vendor convention: focus modes such as "AF-S" / "AF-C" mark autofocus.
    // A missing focus mode counts as manual.
    let auto_focus = tree
        .subtree_at(&MAKER_NOTE_PATH)
        .and_then(|note| note.text(tags::FOCUS_MODE))
        .is_some_and(|mode| mode.starts_with("AF"));

    ImageFacet {
        length: geometry.length,
        width: geometry.width,
        orientation: geometry.orientation,
        compression: geometry.compression,
        date_time: tree
            .scalar_at(&[IFD0, tags::DATE_TIME])
            .and_then(Scalar::to_text),
        date_time_offset: exif
            .and_then(|e| e.scalar(tags::OFFSET_TIME))
            .and_then(Scalar::to_text),
        auto_focus,
        exposure_mode: field(tags::EXPOSURE_MODE),
        exposure_program: field(tags::EXPOSURE_PROGRAM),
        exposure_time: field(tags::EXPOSURE_TIME),
        flash: field(tags::FLASH),
        f_number: field(tags::F_NUMBER),
        focal_length: field(tags::FOCAL_LENGTH),
        focal_length_in_35mm_film: field(tags::FOCAL_LENGTH_IN_35MM_FILM),
        photographic_sensitivity: field(tags::PHOTOGRAPHIC_SENSITIVITY),
        sensitivity_type: field(tags::SENSITIVITY_TYPE),
        light_source: field(tags::LIGHT_SOURCE),
        metering_mode: field(tags::METERING_MODE),
        sensing_method: field(tags::SENSING_METHOD),
        contrast: field(tags::CONTRAST),
        gain_control: field(tags::GAIN_CONTROL),
        saturation: field(tags::SATURATION),
        sharpness: field(tags::SHARPNESS),
        subject_distance_range: field(tags::SUBJECT_DISTANCE_RANGE),
        white_balance: field(tags::WHITE_BALANCE),
    }
}
