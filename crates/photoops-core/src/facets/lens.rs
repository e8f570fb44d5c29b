//! Lens facet, derived from the vendor maker note.
//!
//! Only two maker note tags are understood: the focal/aperture tuple and the
//! lens type token string. Lens identity (make, model, serial), macro and
//! minimum aperture have no reliable source in the decoded data and are
//! always emitted as null. `lens_maker_type` is likewise always empty.

use serde::{Deserialize, Serialize};

use crate::error::{FacetError, FacetResult};
use crate::facets::FacetKind;
use crate::tags::{self, MAKER_NOTE_PATH};
use crate::tree::{Scalar, TagTree, TagValue};

/// Lens facet record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LensFacet {
    pub min_focal: Option<i64>,
    pub max_focal: Option<i64>,
    pub min_aperture: Option<f64>,
    pub max_aperture_high: Option<f64>,
    pub max_aperture_low: Option<f64>,
    pub lens_maker_type: Vec<String>,
    pub camera_maker_type: Vec<String>,
    pub auto_focus: bool,
    pub vibration_reduction: bool,
    pub zoom: bool,
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "macro")]
    pub macro_lens: Option<bool>,
}

/// Focal range and maximum apertures from the maker note 4-tuple.
#[derive(Debug, Clone, Copy)]
struct FocalAperture {
    min_focal: i64,
    max_focal: i64,
    max_aperture_high: f64,
    max_aperture_low: f64,
}

/// Build the lens facet.
///
/// Fails when the focal/aperture tuple is present but is not a sequence of at
/// least four numbers, or when it is present without a lens type. With neither
/// tag present the facet is all null.
pub fn build_lens(tree: &TagTree) -> FacetResult<LensFacet> {
    let maker_note = tree.subtree_at(&MAKER_NOTE_PATH);
    let focal = maker_note.and_then(|note| note.get(tags::LENS_MIN_MAX_FOCAL_MAX_APERTURE));
    let lens_type = maker_note.and_then(|note| note.get(tags::LENS_TYPE));

    let focal = focal.map(focal_aperture).transpose()?;
    let tokens = match (lens_type, focal) {
        (Some(value), _) => lens_type_tokens(value)?,
        (None, Some(_)) => {
            return Err(FacetError::malformed(
                FacetKind::Lens,
                tags::LENS_TYPE,
                "missing while the focal/aperture tuple is present",
            ));
        }
        (None, None) => Vec::new(),
    };

    let mut lens = LensFacet {
        auto_focus: tokens.first().is_some_and(|t| is_auto_focus_token(t)),
        vibration_reduction: tokens.iter().any(|t| t == "VR"),
        camera_maker_type: tokens,
        ..LensFacet::default()
    };

    if let Some(focal) = focal {
        lens.min_focal = Some(focal.min_focal);
        lens.max_focal = Some(focal.max_focal);
        lens.max_aperture_high = Some(focal.max_aperture_high);
        lens.max_aperture_low = Some(focal.max_aperture_low);
        lens.zoom = focal.min_focal != focal.max_focal;
    }

    Ok(lens)
}

/// Lens type strings lead with the focus designation: plain `AF` or a
/// hyphenated family such as `AF-S` / `AF-P`.
fn is_auto_focus_token(token: &str) -> bool {
    token == "AF" || token.starts_with("AF-")
}

fn focal_aperture(value: &TagValue) -> FacetResult<FocalAperture> {
    let numbers = value
        .as_scalar()
        .and_then(Scalar::as_numbers)
        .ok_or_else(|| {
            FacetError::malformed(
                FacetKind::Lens,
                tags::LENS_MIN_MAX_FOCAL_MAX_APERTURE,
                "expected a sequence of numbers",
            )
        })?;

    match numbers {
        [min_focal, max_focal, high, low, ..] => Ok(FocalAperture {
            min_focal: *min_focal as i64,
            max_focal: *max_focal as i64,
            max_aperture_high: *high,
            max_aperture_low: *low,
        }),
        _ => {
            tracing::warn!(
                "Lens focal/aperture tuple has {} element(s), expected 4",
                numbers.len()
            );
            Err(FacetError::malformed(
                FacetKind::Lens,
                tags::LENS_MIN_MAX_FOCAL_MAX_APERTURE,
                format!("expected 4 elements, found {}", numbers.len()),
            ))
        }
    }
}

fn lens_type_tokens(value: &TagValue) -> FacetResult<Vec<String>> {
    value
        .as_scalar()
        .and_then(Scalar::as_text)
        .map(|text| text.split_whitespace().map(str::to_string).collect())
        .ok_or_else(|| FacetError::malformed(FacetKind::Lens, tags::LENS_TYPE, "expected text"))
}
