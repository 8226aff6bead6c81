/// Error types for scanning and exporting.
///
/// Per-entry access problems are not errors at this level: the walker counts
/// and skips them. Only configuration problems stop a scan, and only export
/// failures surface from the report writers.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A scan that could not start (or whose worker died).
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("max results must be at least 1")]
    InvalidMaxResults,

    #[error("failed to spawn scanner thread: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("scanner thread panicked")]
    WorkerPanicked,
}

/// Rendering or writing a report failed. The scan result itself is untouched.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing report: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
