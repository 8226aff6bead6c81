/// Directory walker: the scanning engine.
///
/// The main pass is a serial, name-sorted, depth-first `jwalk` traversal so
/// the walk order (and with it the tie-break order of equally sized files)
/// is the same on every run. Each file goes through the hidden filter
/// (`jwalk`'s `skip_hidden`, which also prunes dot-directories), the category
/// filter, and a `stat`, then into the [`ScanAggregator`].
///
/// An optional pre-pass counts files with a parallel walk; its only job is
/// to provide the denominator for percentage progress, so its order does not
/// matter.
///
/// Per-entry failures (unreadable directories, broken links, files that
/// vanish between listing and `stat`) are counted and skipped. Only an
/// invalid configuration makes `scan` return an error.
use crate::analysis::{classify, ScanAggregator};
use crate::error::ScanError;
use crate::model::{FileEntry, ScanResult};
use crate::scanner::progress::ProgressSink;
use crate::scanner::{CancelToken, ScanOptions};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Report progress at least every this many processed files.
pub const PROGRESS_INTERVAL: u64 = 10;

/// Intermediate updates never claim 100%; that value is reserved for the
/// single terminal update of a completed scan.
const MAX_INTERMEDIATE_PERCENT: f64 = 99.9;

/// Check the cancel flag during the pre-pass every this many entries.
const COUNT_CANCEL_CHECK_INTERVAL: u64 = 1_000;

/// Scan `options.root` and return the aggregated result.
///
/// Runs on the calling thread; use [`crate::scanner::start_scan`] to run it
/// on a worker. A cancelled scan still returns `Ok`, with
/// `completed == false` and the partial counters.
pub fn scan(
    options: &ScanOptions,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<ScanResult, ScanError> {
    options.validate()?;
    let mut aggregator = ScanAggregator::new(options.max_results)?;

    info!(
        "Scanning {} (min size {} B, top {}, hidden {}, {})",
        options.root.display(),
        options.min_file_size,
        options.max_results,
        if options.include_hidden { "included" } else { "skipped" },
        options.category_filter
    );

    let total_estimate = if options.count_first {
        match count_files(options, cancel) {
            Some(n) => {
                debug!("Pre-pass counted {n} files");
                n
            }
            None => {
                info!("Scan cancelled during pre-pass");
                return Ok(aggregator.snapshot(options, false));
            }
        }
    } else {
        0
    };

    let mut progress = ProgressTracker::new(sink, total_estimate);

    let walker = jwalk::WalkDir::new(&options.root)
        .skip_hidden(!options.include_hidden)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial);

    for entry_result in walker {
        if cancel.is_cancelled() {
            info!(
                "Scan cancelled after {} files",
                progress.processed
            );
            return Ok(aggregator.snapshot(options, false));
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // jwalk errors are typically access-denied on directories.
                aggregator.record_error();
                debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            aggregator.record_dir();
            continue;
        }

        progress.processed += 1;

        let file_name = entry.file_name().to_string_lossy();
        let category = classify(&file_name);
        if options.category_filter.is_included(category) {
            let path = entry.path();
            // `metadata` follows links, so a link counts with its target's
            // size and a dangling one is an access error.
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    let size = meta.len();
                    aggregator.observe(
                        FileEntry::new(path, size, category),
                        size >= options.min_file_size,
                    );
                }
                Ok(_) => debug!("Skipping non-regular file {}", path.display()),
                Err(err) => {
                    aggregator.record_error();
                    debug!("Skipping {}: {err}", path.display());
                }
            }
        }

        progress.tick();
    }

    progress.finish();
    let result = aggregator.snapshot(options, true);

    info!(
        "Scan complete: {} scanned, {} qualifying ({} bytes), {} skipped, {:.2}s",
        result.scanned_count,
        result.qualifying_count,
        result.total_qualifying_size,
        result.error_count,
        result.duration_secs
    );
    Ok(result)
}

/// Count the files the main pass will visit, using the same hidden rule.
///
/// Returns `None` if cancelled.
pub fn count_files(options: &ScanOptions, cancel: &CancelToken) -> Option<u64> {
    let walker = jwalk::WalkDir::new(&options.root)
        .skip_hidden(!options.include_hidden)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    let mut seen: u64 = 0;
    let mut files: u64 = 0;
    for entry in walker.into_iter().flatten() {
        seen += 1;
        if seen % COUNT_CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return None;
        }
        if !entry.file_type().is_dir() {
            files += 1;
        }
    }

    if cancel.is_cancelled() {
        return None;
    }
    Some(files)
}

/// Throttles progress calls and shields the walk from the sink.
struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    total_estimate: u64,
    processed: u64,
    last_whole_percent: Option<u64>,
    sink_failed: bool,
}

impl<'a> ProgressTracker<'a> {
    fn new(sink: &'a dyn ProgressSink, total_estimate: u64) -> Self {
        Self {
            sink,
            total_estimate,
            processed: 0,
            last_whole_percent: None,
            sink_failed: false,
        }
    }

    fn percent(&self) -> f64 {
        if self.total_estimate == 0 {
            return 0.0;
        }
        let raw = self.processed as f64 / self.total_estimate as f64 * 100.0;
        raw.min(MAX_INTERMEDIATE_PERCENT)
    }

    /// Report every `PROGRESS_INTERVAL` files, or when the whole percentage
    /// moves.
    fn tick(&mut self) {
        let percent = self.percent();
        let whole = percent as u64;
        if self.processed % PROGRESS_INTERVAL == 0
            || self.last_whole_percent != Some(whole)
        {
            self.last_whole_percent = Some(whole);
            self.emit(percent);
        }
    }

    fn finish(&mut self) {
        self.emit(100.0);
    }

    fn emit(&mut self, percent: f64) {
        let sink = self.sink;
        let (processed, total) = (self.processed, self.total_estimate);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            sink.on_progress(percent, processed, total)
        }));
        if outcome.is_err() && !self.sink_failed {
            self.sink_failed = true;
            warn!("Progress sink panicked; ignoring and continuing the scan");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::progress::NullSink;
    use std::sync::Mutex;

    #[test]
    fn tracker_reports_on_interval_and_percent_change() {
        let calls = Mutex::new(Vec::new());
        let sink = |p: f64, s: u64, _t: u64| calls.lock().unwrap().push((p, s));
        let mut tracker = ProgressTracker::new(&sink, 1_000);
        for _ in 0..25 {
            tracker.processed += 1;
            tracker.tick();
        }
        tracker.finish();

        let calls = calls.into_inner().unwrap();
        let scanned: Vec<u64> = calls.iter().map(|c| c.1).collect();
        // First call, then every 10 files, then the terminal update.
        assert_eq!(scanned, [1, 10, 20, 25]);
        assert_eq!(calls.last().unwrap().0, 100.0);
    }

    #[test]
    fn tracker_never_claims_100_before_finish() {
        let calls = Mutex::new(Vec::new());
        let sink = |p: f64, _s: u64, _t: u64| calls.lock().unwrap().push(p);
        // More files than estimated (files appeared after the pre-pass).
        let mut tracker = ProgressTracker::new(&sink, 5);
        for _ in 0..8 {
            tracker.processed += 1;
            tracker.tick();
        }
        tracker.finish();

        let calls = calls.into_inner().unwrap();
        let (last, rest) = calls.split_last().unwrap();
        assert_eq!(*last, 100.0);
        assert!(rest.iter().all(|&p| p < 100.0));
        assert!(calls.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn tracker_without_estimate_reports_zero_until_done() {
        let calls = Mutex::new(Vec::new());
        let sink = |p: f64, _s: u64, t: u64| calls.lock().unwrap().push((p, t));
        let mut tracker = ProgressTracker::new(&sink, 0);
        for _ in 0..30 {
            tracker.processed += 1;
            tracker.tick();
        }
        tracker.finish();

        let calls = calls.into_inner().unwrap();
        let (last, rest) = calls.split_last().unwrap();
        assert_eq!(*last, (100.0, 0));
        assert!(rest.iter().all(|&(p, t)| p == 0.0 && t == 0));
    }

    #[test]
    fn count_files_skips_hidden_like_the_main_pass() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.txt"), b"a").unwrap();
        std::fs::write(tmp.path().join(".hidden"), b"h").unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        std::fs::write(tmp.path().join(".git").join("HEAD"), b"ref").unwrap();

        let cancel = CancelToken::new();
        let opts = ScanOptions::new(tmp.path());
        assert_eq!(count_files(&opts, &cancel), Some(1));
        let opts = opts.include_hidden(true);
        assert_eq!(count_files(&opts, &cancel), Some(3));
    }

    #[test]
    fn count_files_honours_cancellation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(count_files(&ScanOptions::new(tmp.path()), &cancel), None);
    }

    #[test]
    fn scan_rejects_invalid_root_before_walking() {
        let tmp = tempfile::TempDir::new().unwrap();
        let opts = ScanOptions::new(tmp.path().join("missing"));
        let err = scan(&opts, &NullSink, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }
}
