/// Running scan totals.
///
/// The walker owns one `ScanAggregator` per scan and feeds it every file that
/// passed the hidden and category filters. Nothing here does I/O; at the end
/// of the walk the state is frozen into a [`ScanResult`].
use crate::analysis::{Category, TopFiles};
use crate::error::ScanError;
use crate::model::{CategoryStats, FileEntry, ScanResult};
use crate::scanner::ScanOptions;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug)]
pub struct ScanAggregator {
    scanned_count: u64,
    qualifying_count: u64,
    total_qualifying_size: u64,
    category_stats: HashMap<Category, CategoryStats>,
    top_files: TopFiles,
    error_count: u64,
    dirs_visited: u64,
    started: Instant,
    started_at: DateTime<Local>,
}

impl ScanAggregator {
    /// Fails fast on `max_results == 0`.
    pub fn new(max_results: usize) -> Result<Self, ScanError> {
        if max_results == 0 {
            return Err(ScanError::InvalidMaxResults);
        }
        Ok(Self {
            scanned_count: 0,
            qualifying_count: 0,
            total_qualifying_size: 0,
            category_stats: HashMap::with_capacity(Category::ALL.len()),
            top_files: TopFiles::new(max_results),
            error_count: 0,
            dirs_visited: 0,
            started: Instant::now(),
            started_at: Local::now(),
        })
    }

    /// Record one filtered file. Only entries with `passes_min_size` reach
    /// the qualifying totals and the largest-files list.
    pub fn observe(&mut self, entry: FileEntry, passes_min_size: bool) {
        self.scanned_count += 1;
        if !passes_min_size {
            return;
        }

        self.qualifying_count += 1;
        self.total_qualifying_size += entry.size;

        let stats = self
            .category_stats
            .entry(entry.category)
            .or_insert_with(|| CategoryStats::new(entry.category));
        stats.file_count += 1;
        stats.total_size += entry.size;

        self.top_files.offer(entry);
    }

    /// An entry that could not be read and was skipped.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    pub fn record_dir(&mut self) {
        self.dirs_visited += 1;
    }

    pub fn scanned_count(&self) -> u64 {
        self.scanned_count
    }

    pub fn qualifying_count(&self) -> u64 {
        self.qualifying_count
    }

    pub fn total_qualifying_size(&self) -> u64 {
        self.total_qualifying_size
    }

    pub fn top_files(&self) -> &[FileEntry] {
        self.top_files.as_slice()
    }

    /// Freeze the current state. Category stats are sorted here, by total
    /// size descending with ties in category order.
    pub fn snapshot(&self, options: &ScanOptions, completed: bool) -> ScanResult {
        let mut categories: Vec<CategoryStats> = self.category_stats.values().cloned().collect();
        categories.sort_by(|a, b| {
            b.total_size
                .cmp(&a.total_size)
                .then(a.category.cmp(&b.category))
        });

        ScanResult {
            options: options.clone(),
            scanned_count: self.scanned_count,
            qualifying_count: self.qualifying_count,
            total_qualifying_size: self.total_qualifying_size,
            categories,
            top_files: self.top_files.as_slice().to_vec(),
            error_count: self.error_count,
            dirs_visited: self.dirs_visited,
            started_at: self.started_at,
            duration_secs: self.started.elapsed().as_secs_f64(),
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str, size: u64) -> FileEntry {
        let category = crate::analysis::classify(name);
        FileEntry::new(PathBuf::from(name), size, category)
    }

    #[test]
    fn zero_max_results_is_rejected() {
        assert!(matches!(
            ScanAggregator::new(0),
            Err(ScanError::InvalidMaxResults)
        ));
    }

    #[test]
    fn below_min_size_counts_as_scanned_only() {
        let mut agg = ScanAggregator::new(10).unwrap();
        agg.observe(entry("small.txt", 10), false);
        agg.observe(entry("big.txt", 1_000), true);

        assert_eq!(agg.scanned_count(), 2);
        assert_eq!(agg.qualifying_count(), 1);
        assert_eq!(agg.total_qualifying_size(), 1_000);
        assert_eq!(agg.top_files().len(), 1);
    }

    /// Category sums must always equal the qualifying totals.
    #[test]
    fn category_sums_match_totals() {
        let mut agg = ScanAggregator::new(3).unwrap();
        let files = [
            ("a.mp4", 500),
            ("b.mkv", 250),
            ("c.zip", 300),
            ("d.pdf", 50),
            ("e", 7),
            ("f.weird", 9),
        ];
        for (name, size) in files {
            agg.observe(entry(name, size), true);
        }

        let result = agg.snapshot(&ScanOptions::new("."), true);
        let count: u64 = result.categories.iter().map(|c| c.file_count).sum();
        let size: u64 = result.categories.iter().map(|c| c.total_size).sum();
        assert_eq!(count, result.qualifying_count);
        assert_eq!(size, result.total_qualifying_size);
        assert_eq!(result.top_files.len(), 3);
        assert!(result.scanned_count >= result.qualifying_count);
    }

    #[test]
    fn snapshot_sorts_categories_by_size() {
        let mut agg = ScanAggregator::new(10).unwrap();
        agg.observe(entry("x.rs", 10), true);
        agg.observe(entry("y.iso", 5_000), true);
        agg.observe(entry("z.jpg", 700), true);

        let result = agg.snapshot(&ScanOptions::new("."), true);
        let order: Vec<Category> = result.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            [Category::DiscImages, Category::Images, Category::Code]
        );
    }

    #[test]
    fn video_category_accumulates() {
        let mut agg = ScanAggregator::new(10).unwrap();
        agg.observe(entry("a.mp4", 500), true);
        agg.observe(entry("b.mkv", 250), true);

        let result = agg.snapshot(&ScanOptions::new("."), true);
        let video = result.category(Category::Video).expect("video stats");
        assert_eq!(video.file_count, 2);
        assert_eq!(video.total_size, 750);
    }

    #[test]
    fn errors_and_dirs_are_counted() {
        let mut agg = ScanAggregator::new(1).unwrap();
        agg.record_dir();
        agg.record_dir();
        agg.record_error();

        let result = agg.snapshot(&ScanOptions::new("."), false);
        assert_eq!(result.dirs_visited, 2);
        assert_eq!(result.error_count, 1);
        assert!(!result.completed);
        assert!(result.is_empty());
    }
}
