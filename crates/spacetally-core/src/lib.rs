/// SpaceTally Core: scanning, aggregation, and reports.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, TUI).
///
/// # Modules
///
/// - [`model`]: File entries, frozen scan results and size formatting.
/// - [`analysis`]: File type classification and the in-scan aggregator.
/// - [`scanner`]: Directory walker, progress reporting and the worker handle.
/// - [`report`]: Text, CSV, HTML, workbook and JSON exporters.
/// - [`error`]: Scan and export error types.
pub mod analysis;
pub mod error;
pub mod model;
pub mod report;
pub mod scanner;

pub use analysis::{Category, CategoryFilter};
pub use error::{ExportError, ScanError};
pub use model::{CategoryStats, FileEntry, ScanResult};
pub use scanner::{
    scan, start_scan, start_scan_with, CancelToken, ProgressSink, ScanHandle, ScanOptions,
};
