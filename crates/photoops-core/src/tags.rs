//! Well-known tag and IFD names as emitted by the metadata decoder.
//!
//! Facet builders only ever address the tree through these constants, so a
//! misspelled tag name is a compile error instead of a silently-null field.

// IFD / sub-IFD nodes
pub const IFD0: &str = "ifd0";
pub const EXIF_IFD: &str = "exif_ifd";
pub const GPS_IFD: &str = "gps_ifd";
pub const MAKER_NOTE: &str = "maker_note";

// Camera identity (ifd0)
pub const MAKE: &str = "make";
pub const MODEL: &str = "model";
pub const SOFTWARE: &str = "software";
pub const DATE_TIME: &str = "date_time";

// Maker note
pub const SERIAL_NUMBER: &str = "serial_number";
pub const LENS_MIN_MAX_FOCAL_MAX_APERTURE: &str = "lens_min_max_focal_max_aperture";
pub const LENS_TYPE: &str = "lens_type";
pub const FOCUS_MODE: &str = "focus_mode";

// Geometry, searched at any depth
pub const SUBFILE_TYPE: &str = "subfile_type";
pub const IMAGE_WIDTH: &str = "image_width";
pub const IMAGE_LENGTH: &str = "image_length";
pub const PIXEL_X_DIMENSION: &str = "pixel_x_dimension";
pub const PIXEL_Y_DIMENSION: &str = "pixel_y_dimension";
pub const ORIENTATION: &str = "orientation";
pub const COMPRESSION: &str = "compression";

/// `subfile_type` value marking the primary image rather than a preview.
pub const FULL_RESOLUTION_IMAGE: &str = "Full-resolution image";

// Exposure / capture (exif_ifd)
pub const OFFSET_TIME: &str = "offset_time";
pub const EXPOSURE_MODE: &str = "exposure_mode";
pub const EXPOSURE_PROGRAM: &str = "exposure_program";
pub const EXPOSURE_TIME: &str = "exposure_time";
pub const FLASH: &str = "flash";
pub const F_NUMBER: &str = "f_number";
pub const FOCAL_LENGTH: &str = "focal_length";
pub const FOCAL_LENGTH_IN_35MM_FILM: &str = "focal_length_in_35mm_film";
pub const PHOTOGRAPHIC_SENSITIVITY: &str = "photographic_sensitivity";
pub const SENSITIVITY_TYPE: &str = "sensitivity_type";
pub const LIGHT_SOURCE: &str = "light_source";
pub const METERING_MODE: &str = "metering_mode";
pub const SENSING_METHOD: &str = "sensing_method";
pub const CONTRAST: &str = "contrast";
pub const GAIN_CONTROL: &str = "gain_control";
pub const SATURATION: &str = "saturation";
pub const SHARPNESS: &str = "sharpness";
pub const SUBJECT_DISTANCE_RANGE: &str = "subject_distance_range";
pub const WHITE_BALANCE: &str = "white_balance";

// GPS (gps_ifd)
pub const GPS_VERSION_ID: &str = "gps_version_id";
pub const GPS_LATITUDE_REF: &str = "gps_latitude_ref";
pub const GPS_LATITUDE: &str = "gps_latitude";
pub const GPS_LONGITUDE_REF: &str = "gps_longitude_ref";
pub const GPS_LONGITUDE: &str = "gps_longitude";
pub const GPS_ALTITUDE_REF: &str = "gps_altitude_ref";
pub const GPS_ALTITUDE: &str = "gps_altitude";
pub const GPS_TIMESTAMP: &str = "gps_timestamp";
pub const GPS_SATELLITES: &str = "gps_satellites";
pub const GPS_MAP_DATUM: &str = "gps_map_datum";
pub const GPS_DATE: &str = "gps_date";

/// Path to the vendor maker note.
pub const MAKER_NOTE_PATH: [&str; 2] = [IFD0, MAKER_NOTE];

/// Path to the EXIF sub-IFD.
pub const EXIF_IFD_PATH: [&str; 2] = [IFD0, EXIF_IFD];

/// Path to the GPS sub-IFD.
pub const GPS_IFD_PATH: [&str; 2] = [IFD0, GPS_IFD];
