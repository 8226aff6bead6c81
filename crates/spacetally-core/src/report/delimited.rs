/// Delimited (CSV / tab-separated) report.
///
/// UTF-8 with a byte-order mark so spreadsheet software picks the right
/// encoding. Three sections separated by empty records: header metadata,
/// the category table and the largest-files table. Rows have different
/// widths, so the writer runs in flexible mode.
use crate::error::ExportError;
use crate::model::{format_size, ScanResult};
use crate::report::{format_timestamp, settings_summary, status_label};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the comma-separated report.
pub fn write_csv<W: Write>(result: &ScanResult, out: W) -> Result<(), ExportError> {
    write_sections(result, out, b',')
}

pub fn write_csv_file(result: &ScanResult, path: &Path) -> Result<(), ExportError> {
    let file = BufWriter::new(File::create(path)?);
    write_csv(result, file)
}

/// Write the report with an arbitrary single-byte delimiter.
pub fn write_sections<W: Write>(
    result: &ScanResult,
    mut out: W,
    delimiter: u8,
) -> Result<(), ExportError> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .delimiter(delimiter)
        .from_writer(out);

    // ── Header metadata ──
    record(&mut wtr, &["SpaceTally report"])?;
    record(&mut wtr, &["Scan path", &result.options.root.to_string_lossy()])?;
    record(&mut wtr, &["Scanned at", &format_timestamp(&result.started_at)])?;
    record(&mut wtr, &["Settings", &settings_summary(&result.options)])?;
    record(&mut wtr, &["Status", status_label(result)])?;
    record(&mut wtr, &["Duration (s)", &format!("{:.2}", result.duration_secs)])?;
    record(&mut wtr, &["Files scanned", &result.scanned_count.to_string()])?;
    record(&mut wtr, &["Qualifying files", &result.qualifying_count.to_string()])?;
    record(
        &mut wtr,
        &["Total size (bytes)", &result.total_qualifying_size.to_string()],
    )?;
    record(&mut wtr, &["Total size", &format_size(result.total_qualifying_size)])?;
    record(&mut wtr, &["Skipped entries", &result.error_count.to_string()])?;
    record(&mut wtr, &[])?;

    // ── Category table ──
    record(&mut wtr, &["Category", "Files", "Size (bytes)", "Size", "Share (%)"])?;
    for stats in &result.categories {
        record(
            &mut wtr,
            &[
                stats.category.label(),
                &stats.file_count.to_string(),
                &stats.total_size.to_string(),
                &format_size(stats.total_size),
                &format!("{:.1}", result.percent_of_total(stats.total_size)),
            ],
        )?;
    }
    record(&mut wtr, &[])?;

    // ── Largest files ──
    record(&mut wtr, &["Rank", "Name", "Size (bytes)", "Size", "Category", "Path"])?;
    for (rank, entry) in result.top_files.iter().enumerate() {
        record(
            &mut wtr,
            &[
                &(rank + 1).to_string(),
                &entry.file_name(),
                &entry.size.to_string(),
                &format_size(entry.size),
                entry.category.label(),
                &entry.path.to_string_lossy(),
            ],
        )?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write one row. An empty slice produces a blank separator line.
fn record<W: Write>(wtr: &mut csv::Writer<W>, fields: &[&str]) -> Result<(), ExportError> {
    wtr.write_record(fields)?;
    Ok(())
}
