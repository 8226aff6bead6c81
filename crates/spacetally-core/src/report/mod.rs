/// Report exporters.
///
/// Every exporter reads a finished [`ScanResult`] directly; none of them
/// re-parses another report. Rendering failures surface as [`ExportError`]
/// to the caller of the export only.
pub mod delimited;
pub mod html;
pub mod json;
pub mod text;
pub mod workbook;

use crate::error::ExportError;
use crate::model::{format_size, ScanResult};
use crate::scanner::ScanOptions;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// File name prefix shared by all exported reports.
pub const REPORT_PREFIX: &str = "spacetally_report";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Text,
    Csv,
    Html,
    Xlsx,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Text,
        ExportFormat::Csv,
        ExportFormat::Html,
        ExportFormat::Xlsx,
        ExportFormat::Json,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "html" | "htm" => Ok(Self::Html),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Timestamped file stem, e.g. `spacetally_report_20240131_094500`.
pub fn report_file_stem(at: DateTime<Local>) -> String {
    format!("{REPORT_PREFIX}_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Write `result` in `format` into `dir` as `<stem>.<ext>`.
///
/// Returns the path actually written, which differs from the requested one
/// when the workbook exporter falls back to a delimited `.csv` file.
pub fn export(
    result: &ScanResult,
    format: ExportFormat,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{stem}.{}", format.extension()));
    let written = match format {
        ExportFormat::Text => {
            text::write_file(result, &path)?;
            path
        }
        ExportFormat::Csv => {
            delimited::write_csv_file(result, &path)?;
            path
        }
        ExportFormat::Html => {
            std::fs::write(&path, html::render(result))?;
            path
        }
        ExportFormat::Xlsx => workbook::write_workbook(result, &path)?,
        ExportFormat::Json => {
            json::write_json_file(result, &path)?;
            path
        }
    };
    info!("Exported {format} report to {}", written.display());
    Ok(written)
}

/// Export several formats under one stem.
///
/// A failing format does not stop the others; each outcome is returned
/// next to its format.
pub fn export_all(
    result: &ScanResult,
    formats: &[ExportFormat],
    dir: &Path,
    stem: &str,
) -> Vec<(ExportFormat, Result<PathBuf, ExportError>)> {
    formats
        .iter()
        .map(|&format| {
            let outcome = export(result, format, dir, stem);
            if let Err(e) = &outcome {
                warn!("Failed to export {format} report: {e}");
            }
            (format, outcome)
        })
        .collect()
}

// ── Shared formatting helpers ──────────────────────────────────────────

/// One-line description of the scan settings.
pub(crate) fn settings_summary(options: &ScanOptions) -> String {
    format!(
        "min size {}, top {} files, hidden files {}, {}",
        format_size(options.min_file_size),
        options.max_results,
        if options.include_hidden {
            "included"
        } else {
            "skipped"
        },
        options.category_filter
    )
}

pub(crate) fn status_label(result: &ScanResult) -> &'static str {
    if result.completed {
        "complete"
    } else {
        "cancelled (partial results)"
    }
}

pub(crate) fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_from_names() {
        assert_eq!("TXT".parse::<ExportFormat>(), Ok(ExportFormat::Text));
        assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert!("pdf".parse::<ExportFormat>().is_err());
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>(), Ok(format));
        }
    }

    #[test]
    fn export_writes_each_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = fixtures::sample_result();
        for format in ExportFormat::ALL {
            let path = export(&result, format, tmp.path(), "report").unwrap();
            assert!(path.exists(), "{format} report missing");
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn export_all_reports_each_outcome() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = fixtures::sample_result();
        let outcomes = export_all(
            &result,
            &[ExportFormat::Text, ExportFormat::Json],
            tmp.path(),
            "both",
        );
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, ExportFormat::Text);
        assert!(outcomes.iter().all(|(_, r)| r.is_ok()));
        assert!(tmp.path().join("both.txt").exists());
        assert!(tmp.path().join("both.json").exists());
    }

    #[test]
    fn export_all_continues_after_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let outcomes = export_all(
            &fixtures::empty_result(),
            &[ExportFormat::Csv, ExportFormat::Html],
            &missing,
            "r",
        );
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|(_, r)| r.is_err()));
    }

    #[test]
    fn report_stem_is_timestamped() {
        use chrono::TimeZone;
        let at = Local.with_ymd_and_hms(2024, 1, 31, 9, 45, 0).unwrap();
        assert_eq!(report_file_stem(at), "spacetally_report_20240131_094500");
    }

    #[test]
    fn export_to_missing_dir_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = fixtures::empty_result();
        let err = export(
            &result,
            ExportFormat::Html,
            &tmp.path().join("nope"),
            "report",
        );
        assert!(matches!(err, Err(ExportError::Io(_))));
    }

    #[test]
    fn settings_summary_mentions_filters() {
        let options = ScanOptions::new("/x")
            .min_file_size(1 << 20)
            .include_hidden(true);
        let summary = settings_summary(&options);
        assert!(summary.contains("1.0 MB"));
        assert!(summary.contains("hidden files included"));
        assert!(summary.contains("all categories"));
    }
}
