//! Input validation before parsing.

use std::io::Read;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::InputError;

/// Validates source documents before they are read in full.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Perform quick validation before a full read.
    ///
    /// Checks:
    /// - File exists and is readable
    /// - File size is within limits
    /// - File starts with a JSON object
    pub fn validate(&self, path: &Path) -> Result<(), InputError> {
        if !path.exists() {
            return Err(InputError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| InputError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;
        self.check_size(path, metadata.len())?;
        self.check_header(path)
    }

    /// Check a byte count against the configured document size limit.
    pub fn check_size(&self, path: &Path, len: u64) -> Result<(), InputError> {
        let max_bytes = self.limits.max_document_size_mb.saturating_mul(1024 * 1024);
        if len > max_bytes {
            return Err(InputError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: len / (1024 * 1024),
                max_mb: self.limits.max_document_size_mb,
            });
        }
        Ok(())
    }

    fn check_header(&self, path: &Path) -> Result<(), InputError> {
        let mut file = std::fs::File::open(path).map_err(|e| InputError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot open file: {}", e),
        })?;

        let mut header = [0u8; 64];
        let bytes_read = file.read(&mut header).map_err(|e| InputError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if !Self::is_object_header(&header[..bytes_read]) {
            return Err(InputError::Parse {
                path: path.to_path_buf(),
                message: "Not a JSON object".to_string(),
            });
        }
        Ok(())
    }

    /// True if the first non-whitespace byte opens a JSON object.
    fn is_object_header(header: &[u8]) -> bool {
        let body = header.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(header);
        body.iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'{')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_header() {
        assert!(Validator::is_object_header(b"{\"bucket\": \"b\"}"));
        assert!(Validator::is_object_header(b"  \n\t{"));
        assert!(Validator::is_object_header(b"\xEF\xBB\xBF{"));
        assert!(!Validator::is_object_header(b"[1, 2]"));
        assert!(!Validator::is_object_header(b"\xFF\xD8\xFF\xE0"));
        assert!(!Validator::is_object_header(b"   "));
        assert!(!Validator::is_object_header(b""));
    }

    #[test]
    fn test_validate_missing_file() {
        let validator = Validator::new(LimitsConfig::default());
        let err = validator
            .validate(Path::new("/nonexistent/doc.json"))
            .unwrap_err();
        assert!(matches!(err, InputError::FileNotFound(_)));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "[]").unwrap();
        let err = Validator::new(LimitsConfig::default())
            .validate(&path)
            .unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
    }

    #[test]
    fn test_size_limit() {
        let validator = Validator::new(LimitsConfig {
            max_document_size_mb: 1,
        });
        let path = Path::new("big.json");
        assert!(validator.check_size(path, 1024 * 1024).is_ok());
        let err = validator.check_size(path, 3 * 1024 * 1024).unwrap_err();
        match err {
            InputError::FileTooLarge { size_mb, max_mb, .. } => {
                assert_eq!(size_mb, 3);
                assert_eq!(max_mb, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_size_limit_saturates() {
        let validator = Validator::new(LimitsConfig {
            max_document_size_mb: u64::MAX,
        });
        assert!(validator.check_size(Path::new("big.json"), u64::MAX).is_ok());
    }
}
