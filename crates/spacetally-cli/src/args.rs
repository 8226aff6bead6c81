/// Command-line arguments.
///
/// Positional arguments follow the classic `scan <PATH> [MIN_SIZE_KB]
/// [MAX_FILES] [INCLUDE_HIDDEN]` shape; flags add the rest and can also be
/// set through `SPACETALLY_*` environment variables.
use clap::{ArgAction, Args, Parser, Subcommand};
use spacetally_core::model::parse_size;
use spacetally_core::report::ExportFormat;
use spacetally_core::scanner::{DEFAULT_MAX_RESULTS, DEFAULT_MIN_FILE_SIZE};
use spacetally_core::{Category, CategoryFilter, ScanOptions};
use std::path::PathBuf;
use std::str::FromStr;

/// Default minimum size for the positional argument, in KB.
pub const DEFAULT_MIN_SIZE_KB: u64 = DEFAULT_MIN_FILE_SIZE / 1024;

#[derive(Parser, Debug)]
#[command(
    name = "spacetally",
    version,
    about = "Find out what is using your disk space"
)]
pub struct Cli {
    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a directory and report where the space goes.
    Scan(ScanArgs),
    /// List the file categories and the extensions they cover.
    Categories,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan.
    pub path: PathBuf,

    /// Minimum file size in KB.
    #[arg(value_name = "MIN_SIZE_KB")]
    pub min_size_kb: Option<u64>,

    /// Number of largest files to list.
    #[arg(value_name = "MAX_FILES")]
    pub max_files: Option<usize>,

    /// Include hidden files and directories (y/n).
    #[arg(value_name = "INCLUDE_HIDDEN", value_parser = parse_yes_no)]
    pub include_hidden: Option<bool>,

    /// Minimum file size with a unit, e.g. 500KB or 10MB. Overrides MIN_SIZE_KB.
    #[arg(long, value_name = "SIZE", value_parser = parse_size_arg, env = "SPACETALLY_MIN_SIZE")]
    pub min_size: Option<u64>,

    /// Only aggregate these categories (comma-separated).
    #[arg(long, value_name = "LIST", value_delimiter = ',', env = "SPACETALLY_TYPES")]
    pub types: Vec<Category>,

    /// Skip the counting pre-pass; progress then shows file counts only.
    #[arg(long, env = "SPACETALLY_NO_COUNT")]
    pub no_count: bool,

    /// Export format (repeatable): text, csv, html, xlsx, json or all.
    #[arg(
        long = "format",
        value_name = "FORMAT",
        value_delimiter = ',',
        env = "SPACETALLY_FORMAT"
    )]
    pub formats: Vec<FormatChoice>,

    /// Directory for exported reports.
    #[arg(long, value_name = "DIR", default_value = ".", env = "SPACETALLY_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Plain-text results file written after every scan.
    #[arg(
        long,
        value_name = "FILE",
        default_value = "scan_results.txt",
        env = "SPACETALLY_RESULTS_FILE"
    )]
    pub results_file: PathBuf,

    /// Print neither progress nor the report on stdout.
    #[arg(short, long)]
    pub quiet: bool,
}

impl ScanArgs {
    /// Resolve the arguments into validated-later scan options.
    pub fn to_options(&self) -> ScanOptions {
        let min_file_size = self.min_size.unwrap_or_else(|| {
            self.min_size_kb
                .unwrap_or(DEFAULT_MIN_SIZE_KB)
                .saturating_mul(1024)
        });
        ScanOptions::new(&self.path)
            .min_file_size(min_file_size)
            .max_results(self.max_files.unwrap_or(DEFAULT_MAX_RESULTS))
            .include_hidden(self.include_hidden.unwrap_or(false))
            .category_filter(CategoryFilter::from_categories(self.types.iter().copied()))
            .count_first(!self.no_count)
    }

    /// Requested export formats, deduplicated, in canonical order.
    pub fn export_formats(&self) -> Vec<ExportFormat> {
        let wants_all = self.formats.contains(&FormatChoice::All);
        ExportFormat::ALL
            .into_iter()
            .filter(|f| wants_all || self.formats.contains(&FormatChoice::One(*f)))
            .collect()
    }
}

/// One `--format` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    One(ExportFormat),
    All,
}

impl FromStr for FormatChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::One)
        }
    }
}

/// Accepts y/yes/n/no and true/false, any case.
pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(format!("expected y or n, got '{other}'")),
    }
}

fn parse_size_arg(s: &str) -> Result<u64, String> {
    parse_size(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_args(argv: &[&str]) -> ScanArgs {
        let mut full = vec!["spacetally", "scan"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Scan(args) => args,
            Command::Categories => panic!("expected scan"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_when_only_path_given() {
        let opts = scan_args(&["/tmp"]).to_options();
        assert_eq!(opts.min_file_size, 1024);
        assert_eq!(opts.max_results, 100);
        assert!(!opts.include_hidden);
        assert!(opts.category_filter.is_all());
        assert!(opts.count_first);
    }

    #[test]
    fn positional_arguments() {
        let opts = scan_args(&["/tmp", "500", "20", "y"]).to_options();
        assert_eq!(opts.min_file_size, 500 * 1024);
        assert_eq!(opts.max_results, 20);
        assert!(opts.include_hidden);
    }

    #[test]
    fn min_size_flag_overrides_positional() {
        let opts = scan_args(&["/tmp", "500", "--min-size", "10MB"]).to_options();
        assert_eq!(opts.min_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn invalid_hidden_answer_is_rejected() {
        let argv = ["spacetally", "scan", "/tmp", "1", "10", "maybe"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn yes_no_parsing() {
        assert_eq!(parse_yes_no("Y"), Ok(true));
        assert_eq!(parse_yes_no("yes"), Ok(true));
        assert_eq!(parse_yes_no("N"), Ok(false));
        assert_eq!(parse_yes_no(" no "), Ok(false));
        assert!(parse_yes_no("").is_err());
    }

    #[test]
    fn types_become_category_filter() {
        let opts = scan_args(&["/tmp", "--types", "video,disc-images"]).to_options();
        assert!(opts.category_filter.is_included(Category::Video));
        assert!(opts.category_filter.is_included(Category::DiscImages));
        assert!(!opts.category_filter.is_included(Category::Audio));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let argv = ["spacetally", "scan", "/tmp", "--types", "spreadsheets"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn formats_are_deduplicated_and_expanded() {
        let args = scan_args(&["/tmp", "--format", "json", "--format", "csv,json"]);
        assert_eq!(
            args.export_formats(),
            vec![ExportFormat::Csv, ExportFormat::Json]
        );

        let all = scan_args(&["/tmp", "--format", "all"]);
        assert_eq!(all.export_formats(), ExportFormat::ALL.to_vec());

        assert!(scan_args(&["/tmp"]).export_formats().is_empty());
    }

    #[test]
    fn no_count_disables_pre_pass() {
        let opts = scan_args(&["/tmp", "--no-count"]).to_options();
        assert!(!opts.count_first);
    }
}
