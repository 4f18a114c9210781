//! Command-line interface for managing city guides.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::Parser;

mod commands;
mod config;
mod error;

use commands::{Command, execute};
use config::{StoreArgs, StoreConfig};
pub use error::CliError;

/// Run the city guide CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// store fails, or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let stdout = std::io::stdout();
    run_with(cli, &mut stdout.lock())
}

fn run_with<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    let config = cli.store.into_config()?;
    log::debug!("using guide database {}", config.database);
    run_against_database(&config, cli.command, out)
}

#[cfg(feature = "store-sqlite")]
fn run_against_database<W: Write>(
    config: &StoreConfig,
    command: Command,
    out: &mut W,
) -> Result<(), CliError> {
    let mut store = guide_core::SqliteGuideStore::open(&config.database)?;
    execute(command, &mut store, out)?;
    store.close()?;
    Ok(())
}

#[cfg(not(feature = "store-sqlite"))]
fn run_against_database<W: Write>(
    _config: &StoreConfig,
    _command: Command,
    _out: &mut W,
) -> Result<(), CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "opening the guide database",
    })
}

#[derive(Debug, Parser)]
#[command(
    name = "city-guide",
    about = "Manage city guides and their points of interest",
    version
)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Command,
}

#[cfg(test)]
mod tests;
