/// Plain-text report: a sectioned, human-readable summary.
///
/// Also used for the results file the CLI writes after every scan. The file
/// is an artifact for people; nothing reads it back.
use crate::error::ExportError;
use crate::model::{format_count, format_size, ScanResult};
use crate::report::{format_percent, format_timestamp, settings_summary, status_label};
use std::fmt::Write as _;
use std::path::Path;

const RULE_WIDTH: usize = 70;
const NAME_WIDTH: usize = 40;

pub fn render(result: &ScanResult) -> String {
    let mut out = String::with_capacity(4_096);
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Disk Space Analysis Report");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "Scan path:         {}", result.options.root.display());
    let _ = writeln!(out, "Scanned at:        {}", format_timestamp(&result.started_at));
    let _ = writeln!(out, "Settings:          {}", settings_summary(&result.options));
    let _ = writeln!(out, "Status:            {}", status_label(result));
    let _ = writeln!(out, "Duration:          {:.2} s", result.duration_secs);
    let _ = writeln!(out, "Files scanned:     {}", format_count(result.scanned_count));
    let _ = writeln!(out, "Qualifying files:  {}", format_count(result.qualifying_count));
    let _ = writeln!(out, "Total size:        {}", format_size(result.total_qualifying_size));
    if result.error_count > 0 {
        let _ = writeln!(out, "Skipped entries:   {}", format_count(result.error_count));
    }

    if !result.categories.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "File types (by size)");
        let _ = writeln!(out, "{light}");
        let _ = writeln!(out, "{:<16} {:>10} {:>12} {:>8}", "Type", "Files", "Size", "Share");
        let _ = writeln!(out, "{light}");
        for stats in &result.categories {
            let _ = writeln!(
                out,
                "{:<16} {:>10} {:>12} {:>8}",
                stats.category.label(),
                format_count(stats.file_count),
                format_size(stats.total_size),
                format_percent(result.percent_of_total(stats.total_size))
            );
        }
    }

    if !result.top_files.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Largest files (top {})", result.top_files.len());
        let _ = writeln!(out, "{light}");
        for (rank, entry) in result.top_files.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>4}. {:<name$} {:>12}",
                rank + 1,
                truncate(&entry.file_name(), NAME_WIDTH),
                format_size(entry.size),
                name = NAME_WIDTH
            );
            let _ = writeln!(out, "      {}", entry.path.display());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Hints");
    let _ = writeln!(out, "{light}");
    if result.is_empty() {
        let _ = writeln!(
            out,
            "  No files matched. Try a lower minimum size or a wider type filter."
        );
    } else {
        let _ = writeln!(out, "  1. Video files and archives usually take the most space.");
        let _ = writeln!(out, "  2. Look for duplicate downloads and temporary files.");
        let _ = writeln!(out, "  3. Remove installers you no longer need.");
        let _ = writeln!(out, "  4. Back up anything important before deleting it.");
    }
    let _ = writeln!(out, "{heavy}");
    out
}

pub fn write_file(result: &ScanResult, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, render(result))?;
    Ok(())
}

/// Shorten `s` to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = s.chars().take(keep).collect();
    cut.push_str("...");
    cut
}
