/// Structured logging setup.
///
/// Logs go to stderr so stdout carries only progress and the report.
use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity, or `None` to defer to `RUST_LOG`.
pub fn level_directive(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (verbose, quiet) {
        (0, true) => Some("warn"),
        (0, false) => None,
        (1, _) => Some("debug"),
        _ => Some("trace"),
    }
}

pub fn init(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = match level_directive(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
