/// Scan configuration.
///
/// Built once before a scan and never changed while it runs; the walker and
/// any frontend can share it read-only.
use crate::analysis::CategoryFilter;
use crate::error::ScanError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default minimum file size: 1 KB.
pub const DEFAULT_MIN_FILE_SIZE: u64 = 1024;

/// Default length of the largest-files list.
pub const DEFAULT_MAX_RESULTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOptions {
    /// Directory to scan.
    pub root: PathBuf,
    /// Files strictly smaller than this are counted but not aggregated.
    pub min_file_size: u64,
    /// Upper bound on the largest-files list.
    pub max_results: usize,
    /// When `false`, dot-entries are skipped and dot-directories pruned.
    pub include_hidden: bool,
    pub category_filter: CategoryFilter,
    /// Count files in a pre-pass so progress can be reported as a percentage.
    pub count_first: bool,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            min_file_size: DEFAULT_MIN_FILE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
            include_hidden: false,
            category_filter: CategoryFilter::All,
            count_first: true,
        }
    }

    pub fn min_file_size(mut self, bytes: u64) -> Self {
        self.min_file_size = bytes;
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn category_filter(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = filter;
        self
    }

    pub fn count_first(mut self, count: bool) -> Self {
        self.count_first = count;
        self
    }

    /// Check the options before any traversal starts.
    pub fn validate(&self) -> Result<(), ScanError> {
        validate_root(&self.root)?;
        if self.max_results == 0 {
            return Err(ScanError::InvalidMaxResults);
        }
        Ok(())
    }
}

fn validate_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(_) => Err(ScanError::RootNotFound(root.to_path_buf())),
    }
}
