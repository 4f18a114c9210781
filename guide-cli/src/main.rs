//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use guide_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    init_logging();
    match guide_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => Ok(outcome?),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`). Records emitted
/// through the `log` facade are forwarded as well.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
