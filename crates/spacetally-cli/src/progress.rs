/// Console progress lines.
///
/// The scanner emits an update every few files; printing all of them would
/// flood the terminal, so lines are thinned to one per whole percent (or
/// per [`COUNT_LINE_STEP`] files when no estimate exists). The final update
/// is always printed.
use spacetally_core::model::format_count;
use spacetally_core::scanner::ScanProgress;

/// Files between lines when progress is count-only.
pub const COUNT_LINE_STEP: u64 = 1_000;

#[derive(Debug, Default)]
pub struct ProgressPrinter {
    last_bucket: Option<u64>,
}

impl ProgressPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The line to print for `update`, if any.
    pub fn line(&mut self, update: &ScanProgress) -> Option<String> {
        if update.is_final() {
            return Some(format!(
                "[progress] 100.0% ({} files)",
                format_count(update.scanned)
            ));
        }

        let bucket = if update.total_estimate > 0 {
            update.percent.floor() as u64
        } else {
            update.scanned / COUNT_LINE_STEP
        };
        if self.last_bucket == Some(bucket) {
            return None;
        }
        self.last_bucket = Some(bucket);

        Some(if update.total_estimate > 0 {
            format!(
                "[progress] {:.1}% ({}/{})",
                update.percent,
                format_count(update.scanned),
                format_count(update.total_estimate)
            )
        } else {
            format!("[progress] {} files scanned", format_count(update.scanned))
        })
    }
}
