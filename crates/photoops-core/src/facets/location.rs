//! GPS location facet.

use serde::{Deserialize, Serialize};

use crate::tags::{self, GPS_IFD_PATH};
use crate::tree::{Scalar, TagTree};

/// Location facet record. Values are passed through as decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFacet {
    pub gps_version_id: Option<Vec<i64>>,
    pub gps_latitude_ref: Option<Scalar>,
    pub gps_latitude: Option<Scalar>,
    pub gps_longitude_ref: Option<Scalar>,
    pub gps_longitude: Option<Scalar>,
    pub gps_altitude_ref: Option<Scalar>,
    pub gps_altitude: Option<Scalar>,
    pub gps_timestamp: Option<Scalar>,
    pub gps_satellites: Option<Scalar>,
    pub gps_map_datum: Option<Scalar>,
    pub gps_date: Option<Scalar>,
}

/// Copy GPS fields from `ifd0.gps_ifd`. A tree without a GPS sub-IFD yields
/// an all-null facet.
pub fn build_location(tree: &TagTree) -> LocationFacet {
    let Some(gps) = tree.subtree_at(&GPS_IFD_PATH) else {
        tracing::trace!("No GPS sub-IFD");
        return LocationFacet::default();
    };
    let field = |name: &str| gps.scalar(name).cloned();

    LocationFacet {
        gps_version_id: gps.scalar(tags::GPS_VERSION_ID).and_then(version_id),
        gps_latitude_ref: field(tags::GPS_LATITUDE_REF),
        gps_latitude: field(tags::GPS_LATITUDE),
        gps_longitude_ref: field(tags::GPS_LONGITUDE_REF),
        gps_longitude: field(tags::GPS_LONGITUDE),
        gps_altitude_ref: field(tags::GPS_ALTITUDE_REF),
        gps_altitude: field(tags::GPS_ALTITUDE),
        gps_timestamp: field(tags::GPS_TIMESTAMP),
        gps_satellites: field(tags::GPS_SATELLITES),
        gps_map_datum: field(tags::GPS_MAP_DATUM),
        gps_date: field(tags::GPS_DATE),
    }
}

/// Version IDs are byte sequences such as `[2, 3, 0, 0]`.
fn version_id(value: &Scalar) -> Option<Vec<i64>> {
    match value {
        Scalar::Numbers(parts) => Some(parts.iter().map(|p| *p as i64).collect()),
        Scalar::Integer(single) => Some(vec![*single]),
        _ => None,
    }
}
