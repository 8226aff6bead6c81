/// A single file seen by the walker.
///
/// Entries are transient: the walker builds one per qualifying file, hands it
/// to the aggregator and drops it unless it makes the largest-files list.
use crate::analysis::Category;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Full path as produced by the walk (root-prefixed).
    pub path: PathBuf,
    /// Logical file size in bytes.
    pub size: u64,
    pub category: Category,
}

impl FileEntry {
    pub fn new(path: PathBuf, size: u64, category: Category) -> Self {
        Self {
            path,
            size,
            category,
        }
    }

    /// File name only, for compact listings.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Containing directory, or an empty string for a bare name.
    pub fn parent_dir(&self) -> String {
        self.path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
