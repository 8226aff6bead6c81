/// SpaceTally CLI: command-line frontend.
///
/// Parses arguments, runs the scan on the core's worker thread while
/// printing progress, then prints the text report, writes the results file
/// and any requested exports. Ctrl-C stops the scan early and the partial
/// result is reported the same way. Business logic lives in `spacetally-core`.
pub mod args;
pub mod logging;
pub mod progress;

use anyhow::Context;
use args::{Cli, Command, ScanArgs};
use chrono::Local;
use clap::Parser;
use progress::ProgressPrinter;
use spacetally_core::report::{export_all, report_file_stem, text};
use spacetally_core::{start_scan_with, CancelToken, Category};
use std::io::{self, Write};
use tracing::{info, warn};

/// Entry point used by the `spacetally` binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let quiet = matches!(&cli.command, Command::Scan(args) if args.quiet);
    logging::init(cli.verbose, quiet)?;

    match cli.command {
        Command::Scan(args) => {
            let cancel = CancelToken::new();
            install_interrupt_handler(&cancel)?;
            run_scan(&args, &cancel)
        }
        Command::Categories => {
            let stdout = io::stdout();
            print_categories(&mut stdout.lock())?;
            Ok(())
        }
    }
}

/// Cancel `cancel` on the first Ctrl-C.
///
/// Can only be installed once per process.
fn install_interrupt_handler(cancel: &CancelToken) -> anyhow::Result<()> {
    let cancel = cancel.clone();
    ctrlc::set_handler(move || {
        if !cancel.is_cancelled() {
            eprintln!("Interrupted, stopping scan...");
        }
        cancel.cancel();
    })
    .context("cannot install Ctrl-C handler")
}

/// Scan, report and export according to `args`.
///
/// Cancelling `cancel` stops the walk; whatever was tallied so far is
/// still reported and exported, marked as partial.
pub fn run_scan(args: &ScanArgs, cancel: &CancelToken) -> anyhow::Result<()> {
    let options = args.to_options();
    let formats = args.export_formats();

    let handle = start_scan_with(options, cancel.clone())
        .with_context(|| format!("cannot scan {}", args.path.display()))?;

    let mut printer = ProgressPrinter::new();
    for update in handle.progress_rx.iter() {
        if args.quiet {
            continue;
        }
        if let Some(line) = printer.line(&update) {
            println!("{line}");
        }
    }

    let result = handle.join().context("scan failed")?;
    if !result.completed {
        warn!(
            "Scan stopped early after {} files; reporting partial results",
            result.scanned_count
        );
    }

    if !args.quiet {
        println!();
        print!("{}", text::render(&result));
    }

    text::write_file(&result, &args.results_file).with_context(|| {
        format!(
            "cannot write results file {}",
            args.results_file.display()
        )
    })?;
    info!("Results written to {}", args.results_file.display());

    if formats.is_empty() {
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            args.output_dir.display()
        )
    })?;

    let stem = report_file_stem(Local::now());
    let mut failures = 0usize;
    for (format, outcome) in export_all(&result, &formats, &args.output_dir, &stem) {
        match outcome {
            Ok(path) => {
                if !args.quiet {
                    println!("Saved {format} report: {}", path.display());
                }
            }
            Err(e) => {
                warn!("{format} export failed: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} exports failed", formats.len());
    }
    Ok(())
}

/// List every category with its extensions.
pub fn print_categories<W: Write>(out: &mut W) -> io::Result<()> {
    for category in Category::ALL {
        let extensions = category.extensions();
        let listed = if extensions.is_empty() {
            match category {
                Category::NoExtension => "(files without an extension)".to_string(),
                _ => "(any other extension)".to_string(),
            }
        } else {
            extensions.join(", ")
        };
        writeln!(out, "{:<14} {:<14} {}", category.name(), category.label(), listed)?;
    }
    Ok(())
}
