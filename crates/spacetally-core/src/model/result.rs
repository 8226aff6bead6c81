/// Immutable scan results.
///
/// A `ScanResult` is produced once per scan and never mutated afterwards.
/// It owns everything exporters need, so it can be shared freely across
/// threads (`Arc<ScanResult>`) without locking.
use crate::analysis::Category;
use crate::model::FileEntry;
use crate::scanner::ScanOptions;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Size and count totals for a single file category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub file_count: u64,
    pub total_size: u64,
}

impl CategoryStats {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            file_count: 0,
            total_size: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Options the scan ran with.
    pub options: ScanOptions,
    /// Files that passed the hidden and category filters, any size.
    pub scanned_count: u64,
    /// Files that also reached the minimum size.
    pub qualifying_count: u64,
    pub total_qualifying_size: u64,
    /// Per-category totals, largest total size first.
    pub categories: Vec<CategoryStats>,
    /// Largest qualifying files, largest first, ties in walk order.
    pub top_files: Vec<FileEntry>,
    /// Entries skipped because they could not be read.
    pub error_count: u64,
    /// Directories entered, including the root.
    pub dirs_visited: u64,
    pub started_at: DateTime<Local>,
    pub duration_secs: f64,
    /// `false` when the scan was cancelled and the counters are partial.
    pub completed: bool,
}

impl ScanResult {
    /// Share of the total qualifying size, 0.0–100.0.
    pub fn percent_of_total(&self, size: u64) -> f64 {
        if self.total_qualifying_size == 0 {
            0.0
        } else {
            size as f64 / self.total_qualifying_size as f64 * 100.0
        }
    }

    /// Stats for one category, if any qualifying file fell into it.
    pub fn category(&self, category: Category) -> Option<&CategoryStats> {
        self.categories.iter().find(|s| s.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.qualifying_count == 0
    }
}
