//! File and container classification.
//!
//! Combines the object key's extension with the container guess from an
//! external magic-byte sniffer. This is best-effort detection for routing
//! (for example, deciding whether a JPEG needs to be derived from a RAW), not
//! authoritative file validation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::ClassifierConfig;

/// Extensions that always name a plain TIFF, whatever the config adds.
const STANDARD_TIFF_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// Canonical container type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileType {
    Jpeg,
    Tiff,
    /// Any other sniffed container, uppercased (e.g. `"PNG"`)
    Other(String),
    /// No container signal was available
    Unknown,
}

impl FileType {
    /// Map a sniffer's container guess to a file type. Never fails.
    pub fn from_signal(signal: Option<&str>) -> Self {
        let Some(signal) = signal.map(str::trim).filter(|s| !s.is_empty()) else {
            return FileType::Unknown;
        };
        match signal.to_ascii_lowercase().as_str() {
            "tif" => FileType::Tiff,
            "jpg" => FileType::Jpeg,
            _ => Self::from_name(&signal.to_uppercase()),
        }
    }

    /// Parse the canonical uppercase name written into records.
    fn from_name(name: &str) -> Self {
        match name {
            "JPEG" => FileType::Jpeg,
            "TIFF" => FileType::Tiff,
            "UNKNOWN" => FileType::Unknown,
            other => FileType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileType::Jpeg => "JPEG",
            FileType::Tiff => "TIFF",
            FileType::Other(name) => name.as_str(),
            FileType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FileType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// File facet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacet {
    pub file_type: FileType,
    pub extension: Option<String>,
    pub object_size: u64,
    pub is_jpeg: bool,
    pub is_raw: bool,
}

/// Classifies source objects by key and container signal.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    tiff_extensions: Vec<String>,
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl FileClassifier {
    /// Create a classifier with the given settings.
    ///
    /// Configured extensions extend the standard `tif`/`tiff` pair.
    pub fn new(config: ClassifierConfig) -> Self {
        let mut tiff_extensions: Vec<String> = STANDARD_TIFF_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect();
        for ext in config.tiff_extensions {
            let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() && !tiff_extensions.contains(&ext) {
                tiff_extensions.push(ext);
            }
        }
        Self { tiff_extensions }
    }

    /// Classify one object.
    ///
    /// A TIFF-family container under a non-standard extension is treated as a
    /// proprietary RAW (CR2, NEF, ARW and friends are TIFF underneath).
    pub fn classify(&self, key: &str, container: Option<&str>, object_size: u64) -> FileFacet {
        let extension = extension_of(key);
        let file_type = FileType::from_signal(container);
        let is_jpeg = file_type == FileType::Jpeg;
        let is_raw = file_type == FileType::Tiff
            && extension
                .as_deref()
                .is_some_and(|ext| !self.tiff_extensions.iter().any(|t| t == ext));

        FileFacet {
            file_type,
            extension,
            object_size,
            is_jpeg,
            is_raw,
        }
    }
}

/// Lowercased text after the last `.` of the key's final path segment.
pub fn extension_of(key: &str) -> Option<String> {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(key: &str, container: Option<&str>) -> FileFacet {
        FileClassifier::default().classify(key, container, 1024)
    }

    #[test]
    fn test_raw_under_tiff_container() {
        let facet = classify("photo.cr2", Some("tif"));
        assert_eq!(facet.file_type, FileType::Tiff);
        assert_eq!(facet.extension.as_deref(), Some("cr2"));
        assert!(!facet.is_jpeg);
        assert!(facet.is_raw);
        assert_eq!(facet.object_size, 1024);
    }

    #[test]
    fn test_standard_tiff_is_not_raw() {
        assert!(!classify("scan.tif", Some("tif")).is_raw);
        assert!(!classify("scan.TIFF", Some("tif")).is_raw);
    }

    #[test]
    fn test_jpeg() {
        let facet = classify("2021/IMG_0001.JPG", Some("jpg"));
        assert_eq!(facet.file_type, FileType::Jpeg);
        assert_eq!(facet.extension.as_deref(), Some("jpg"));
        assert!(facet.is_jpeg);
        assert!(!facet.is_raw);
    }

    #[test]
    fn test_other_signal_is_uppercased() {
        let facet = classify("pic.png", Some("png"));
        assert_eq!(facet.file_type, FileType::Other("PNG".into()));
        assert!(!facet.is_jpeg);
        assert!(!facet.is_raw);
    }

    #[test]
    fn test_missing_signal_is_unknown() {
        assert_eq!(classify("pic.nef", None).file_type, FileType::Unknown);
        assert_eq!(classify("pic.nef", Some("  ")).file_type, FileType::Unknown);
        assert!(!classify("pic.nef", None).is_raw);
    }

    #[test]
    fn test_no_extension_is_never_raw() {
        let facet = classify("uploads/DSC_0042", Some("tif"));
        assert!(facet.extension.is_none());
        assert!(!facet.is_raw);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a/b/photo.tar.NEF").as_deref(), Some("nef"));
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of("album.2021/IMG_1"), None);
        assert_eq!(extension_of("noext"), None);
    }

    #[test]
    fn test_signal_case_insensitive() {
        assert_eq!(FileType::from_signal(Some("TIF")), FileType::Tiff);
        assert_eq!(FileType::from_signal(Some("Jpg")), FileType::Jpeg);
    }

    #[test]
    fn test_custom_tiff_extensions() {
        let classifier = FileClassifier::new(ClassifierConfig {
            tiff_extensions: vec!["tif".into(), "tiff".into(), "DNG".into()],
        });
        assert!(!classifier.classify("x.dng", Some("tif"), 0).is_raw);
        assert!(classifier.classify("x.nef", Some("tif"), 0).is_raw);
    }

    #[test]
    fn test_configured_extensions_never_drop_tif() {
        let config =
            crate::Config::from_toml("[classifier]\ntiff_extensions = [\"dng\"]").unwrap();
        let classifier = FileClassifier::new(config.classifier);
        assert!(!classifier.classify("scan.tif", Some("tif"), 1).is_raw);
        assert!(!classifier.classify("scan.TIFF", Some("tif"), 1).is_raw);
        assert!(!classifier.classify("x.dng", Some("tif"), 1).is_raw);
        assert!(classifier.classify("x.nef", Some("tif"), 1).is_raw);
    }

    #[test]
    fn test_file_type_serializes_as_string() {
        let facet = classify("photo.cr2", Some("tif"));
        let json = serde_json::to_value(&facet).unwrap();
        assert_eq!(json["file_type"], "TIFF");
        assert_eq!(json["extension"], "cr2");
        assert_eq!(json["is_raw"], true);

        let parsed: FileFacet = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, facet);
    }

    #[test]
    fn test_totality_over_arbitrary_signals() {
        for signal in ["", "tif", "jpg", "heic", "???", "ñ", "x y"] {
            let facet = classify("a.tif", Some(signal));
            assert_eq!(facet.is_jpeg, facet.file_type == FileType::Jpeg);
            assert!(!facet.is_raw);
        }
    }
}
