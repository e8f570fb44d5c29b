//! Loading source documents from disk.
//!
//! - **discovery**: find `*.json` documents in directories
//! - **validate**: existence, size and header checks before a full read

pub mod discovery;
pub mod validate;

pub use discovery::{DiscoveredDocument, DocumentDiscovery};
pub use validate::Validator;

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::InputError;
use crate::types::SourceDocument;

/// Parse a source document from raw bytes read from `path`.
pub fn parse_document(path: &Path, bytes: &[u8]) -> Result<SourceDocument, InputError> {
    serde_json::from_slice(bytes).map_err(|e| InputError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Validates and parses source documents.
pub struct DocumentLoader {
    validator: Validator,
}

impl DocumentLoader {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            validator: Validator::new(limits),
        }
    }

    /// Validate then read and parse one document.
    pub fn load(&self, path: &Path) -> Result<SourceDocument, InputError> {
        self.validator.validate(path)?;
        let bytes = std::fs::read(path).map_err(|e| InputError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        parse_document(path, &bytes)
    }

    /// Async variant for callers on the tokio runtime.
    ///
    /// The quick checks stay synchronous; only the full read is offloaded.
    pub async fn load_async(&self, path: &Path) -> Result<SourceDocument, InputError> {
        self.validator.validate(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|e| InputError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        parse_document(path, &bytes)
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "bucket": "photos",
        "key": "IMG_0001.JPG",
        "size": 4096,
        "container": "jpg",
        "exif": {"ifd0": {"make": "Canon", "model": "Canon EOS R5"}}
    }"#;

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, DOC).unwrap();

        let doc = DocumentLoader::new(LimitsConfig::default())
            .load(&path)
            .unwrap();
        assert_eq!(doc.key, "IMG_0001.JPG");
        assert_eq!(doc.exif.text_at(&["ifd0", "model"]), Some("Canon EOS R5"));
    }

    #[tokio::test]
    async fn test_load_document_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, DOC).unwrap();

        let doc = DocumentLoader::new(LimitsConfig::default())
            .load_async(&path)
            .await
            .unwrap();
        assert_eq!(doc.size, 4096);
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = parse_document(Path::new("bad.json"), b"{\"bucket\": 1}").unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }
}
