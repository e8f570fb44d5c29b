//! Finding source documents on disk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers source documents (`*.json`) in files and directories.
#[derive(Debug, Clone, Default)]
pub struct DocumentDiscovery;

/// A document found on disk.
#[derive(Debug, Clone)]
pub struct DiscoveredDocument {
    /// Full path to the document
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl DocumentDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// Discover all source documents at a path.
    ///
    /// An explicitly named file is always returned, whatever its extension.
    /// Directories are walked recursively for `.json` files.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredDocument> {
        if path.is_file() {
            return std::fs::metadata(path)
                .map(|meta| {
                    vec![DiscoveredDocument {
                        path: path.to_path_buf(),
                        size: meta.len(),
                    }]
                })
                .unwrap_or_default();
        }

        let mut documents: Vec<DiscoveredDocument> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && Self::is_document(entry.path()))
            .filter_map(|entry| {
                let size = entry.metadata().ok()?.len();
                Some(DiscoveredDocument {
                    path: entry.into_path(),
                    size,
                })
            })
            .collect();

        // Sort by path for deterministic ordering
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        documents
    }

    fn is_document(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    /// Get total size of all discovered documents.
    pub fn total_size(documents: &[DiscoveredDocument]) -> u64 {
        documents.iter().map(|d| d.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_document() {
        assert!(DocumentDiscovery::is_document(Path::new("a.json")));
        assert!(DocumentDiscovery::is_document(Path::new("a.JSON")));
        assert!(!DocumentDiscovery::is_document(Path::new("a.jpg")));
        assert!(!DocumentDiscovery::is_document(Path::new("json")));
    }

    #[test]
    fn test_discover_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("nested/a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let found = DocumentDiscovery::new().discover(dir.path());
        let names: Vec<_> = found
            .iter()
            .map(|d| d.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("b.json"), PathBuf::from("nested/a.json")]
        );
        assert_eq!(DocumentDiscovery::total_size(&found), 4);
    }

    #[test]
    fn test_discover_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.exif");
        std::fs::write(&path, "{}").unwrap();
        let found = DocumentDiscovery::new().discover(&path);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].size, 2);
    }

    #[test]
    fn test_discover_missing_path() {
        assert!(DocumentDiscovery::new()
            .discover(Path::new("/nonexistent/photoops"))
            .is_empty());
    }
}
