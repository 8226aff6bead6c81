/// Data model for SpaceTally scans.
///
/// Re-exports the per-file entry, the frozen result types and the size
/// formatting helpers.
pub mod entry;
pub mod result;
pub mod size;

pub use entry::FileEntry;
pub use result::{CategoryStats, ScanResult};
pub use size::{format_count, format_size, parse_size, ParseSizeError};
