/// Spreadsheet workbook report.
///
/// With the `xlsx` feature this writes a styled `.xlsx` workbook: a merged
/// title row, scan metadata, then the category and largest-files tables
/// under coloured header rows. Without it, the same sections are written
/// as a tab-delimited, BOM-prefixed file with a `.csv` extension.
use crate::error::ExportError;
use crate::model::{format_size, ScanResult};
use crate::report::{delimited, format_timestamp, settings_summary, status_label};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write the workbook for `result` to `path`.
///
/// Returns the path actually written, which is the fallback file's path
/// when the crate is built without the `xlsx` feature.
pub fn write_workbook(result: &ScanResult, path: &Path) -> Result<PathBuf, ExportError> {
    #[cfg(feature = "xlsx")]
    {
        xlsx::write(result, path)?;
        Ok(path.to_path_buf())
    }
    #[cfg(not(feature = "xlsx"))]
    {
        write_fallback(result, path)
    }
}

/// Tab-delimited stand-in for the workbook.
///
/// Named `<stem>_sheet.csv` next to `path` so it never overwrites the
/// regular CSV export of the same scan.
pub fn write_fallback(result: &ScanResult, path: &Path) -> Result<PathBuf, ExportError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let target = path.with_file_name(format!("{stem}_sheet.csv"));
    let file = BufWriter::new(File::create(&target)?);
    delimited::write_sections(result, file, b'\t')?;
    Ok(target)
}

/// Label/value pairs for the block under the workbook title.
fn metadata_rows(result: &ScanResult) -> Vec<(&'static str, String)> {
    vec![
        ("Scan path", result.options.root.to_string_lossy().into_owned()),
        ("Scanned at", format_timestamp(&result.started_at)),
        ("Settings", settings_summary(&result.options)),
        ("Status", status_label(result).to_string()),
        ("Duration (s)", format!("{:.2}", result.duration_secs)),
        ("Files scanned", result.scanned_count.to_string()),
        ("Qualifying files", result.qualifying_count.to_string()),
        ("Total size", format_size(result.total_qualifying_size)),
        ("Skipped entries", result.error_count.to_string()),
    ]
}

#[cfg(feature = "xlsx")]
mod xlsx {
    use crate::error::ExportError;
    use crate::model::{format_size, ScanResult};
    use super::metadata_rows;
    use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
    use std::path::Path;

    const SHEET_NAME: &str = "Disk Analysis";
    const TITLE_BLUE: u32 = 0x4472C4;
    const HEADER_GREEN: u32 = 0x70AD47;
    const STRIPE_GREY: u32 = 0xF2F2F2;
    const COLUMN_WIDTHS: [f64; 6] = [10.0, 36.0, 16.0, 14.0, 14.0, 60.0];

    struct Styles {
        title: Format,
        section: Format,
        header: Format,
        label: Format,
        cell: Format,
        stripe: Format,
    }

    impl Styles {
        fn new() -> Self {
            let border = |f: Format| f.set_border(FormatBorder::Thin);
            Self {
                title: Format::new()
                    .set_bold()
                    .set_font_size(16)
                    .set_font_color(Color::White)
                    .set_background_color(Color::RGB(TITLE_BLUE))
                    .set_align(FormatAlign::Center),
                section: Format::new().set_bold().set_font_size(13),
                header: border(
                    Format::new()
                        .set_bold()
                        .set_font_size(12)
                        .set_font_color(Color::White)
                        .set_background_color(Color::RGB(HEADER_GREEN))
                        .set_align(FormatAlign::Center),
                ),
                label: Format::new().set_bold(),
                cell: border(Format::new()),
                stripe: border(Format::new().set_background_color(Color::RGB(STRIPE_GREY))),
            }
        }

        fn row(&self, index: usize) -> &Format {
            if index % 2 == 1 {
                &self.stripe
            } else {
                &self.cell
            }
        }
    }

    pub(super) fn write(result: &ScanResult, path: &Path) -> Result<(), ExportError> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        sheet.merge_range(0, 0, 0, 5, "Disk Space Analysis Report", &styles.title)?;

        let mut row = 2u32;
        for (label, value) in &metadata_rows(result) {
            sheet.write_string_with_format(row, 0, *label, &styles.label)?;
            sheet.write_string(row, 1, value)?;
            row += 1;
        }

        row += 1;
        write_category_table(sheet, &styles, result, &mut row)?;
        row += 1;
        write_top_files_table(sheet, &styles, result, &mut row)?;

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            sheet.set_column_width(col as u16, *width)?;
        }

        workbook.save(path)?;
        Ok(())
    }

    fn write_category_table(
        sheet: &mut Worksheet,
        styles: &Styles,
        result: &ScanResult,
        row: &mut u32,
    ) -> Result<(), ExportError> {
        sheet.write_string_with_format(*row, 0, "File types", &styles.section)?;
        *row += 1;
        for (col, title) in ["Type", "Files", "Size (bytes)", "Size", "Share (%)"]
            .iter()
            .enumerate()
        {
            sheet.write_string_with_format(*row, col as u16, *title, &styles.header)?;
        }
        *row += 1;

        for (i, stats) in result.categories.iter().enumerate() {
            let fmt = styles.row(i);
            sheet.write_string_with_format(*row, 0, stats.category.label(), fmt)?;
            sheet.write_number_with_format(*row, 1, stats.file_count as f64, fmt)?;
            sheet.write_number_with_format(*row, 2, stats.total_size as f64, fmt)?;
            sheet.write_string_with_format(*row, 3, format_size(stats.total_size), fmt)?;
            let share = (result.percent_of_total(stats.total_size) * 10.0).round() / 10.0;
            sheet.write_number_with_format(*row, 4, share, fmt)?;
            *row += 1;
        }
        Ok(())
    }

    fn write_top_files_table(
        sheet: &mut Worksheet,
        styles: &Styles,
        result: &ScanResult,
        row: &mut u32,
    ) -> Result<(), ExportError> {
        sheet.write_string_with_format(*row, 0, "Largest files", &styles.section)?;
        *row += 1;
        for (col, title) in ["Rank", "Name", "Size (bytes)", "Size", "Type", "Folder"]
            .iter()
            .enumerate()
        {
            sheet.write_string_with_format(*row, col as u16, *title, &styles.header)?;
        }
        *row += 1;

        for (i, entry) in result.top_files.iter().enumerate() {
            let fmt = styles.row(i);
            sheet.write_number_with_format(*row, 0, (i + 1) as f64, fmt)?;
            sheet.write_string_with_format(*row, 1, entry.file_name(), fmt)?;
            sheet.write_number_with_format(*row, 2, entry.size as f64, fmt)?;
            sheet.write_string_with_format(*row, 3, format_size(entry.size), fmt)?;
            sheet.write_string_with_format(*row, 4, entry.category.label(), fmt)?;
            sheet.write_string_with_format(*row, 5, entry.parent_dir(), fmt)?;
            *row += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_result;

    #[test]
    fn fallback_writes_tab_delimited_csv() {
        let tmp = tempfile::TempDir::new().unwrap();
        let requested = tmp.path().join("report.xlsx");
        let written = write_fallback(&sample_result(), &requested).unwrap();

        assert_eq!(written, tmp.path().join("report_sheet.csv"));
        let bytes = std::fs::read(&written).unwrap();
        assert!(bytes.starts_with(delimited::UTF8_BOM));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Rank\tName\tSize (bytes)"));
        assert!(text.contains("film.mp4"));
    }

    #[test]
    fn metadata_matches_text_report_fields() {
        let mut result = sample_result();
        result.error_count = 2;
        let rows = metadata_rows(&result);
        let get = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("Files scanned").as_deref(), Some("5"));
        assert_eq!(get("Qualifying files").as_deref(), Some("4"));
        assert_eq!(get("Skipped entries").as_deref(), Some("2"));
        assert_eq!(get("Status").as_deref(), Some("complete"));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn workbook_is_a_zip_container() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("report.xlsx");
        let written = write_workbook(&sample_result(), &path).unwrap();

        assert_eq!(written, path);
        let bytes = std::fs::read(&written).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
