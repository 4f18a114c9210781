//! Helpers for driving commands and decoding their JSON output.

use super::*;
use guide_core::MemoryGuideStore;
use serde_json::Value;

/// Run a command line (without the program name) against `store`.
pub(super) fn execute_line(
    store: &mut MemoryGuideStore,
    args: &[&str],
) -> Result<Value, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("city-guide").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    execute(cli.command, store, &mut out)?;
    Ok(serde_json::from_slice(&out).expect("command output should be JSON"))
}

/// Run a command line through the full entry point, including opening the
/// database named by `--database`.
pub(super) fn run_line(args: &[String]) -> Result<Value, CliError> {
    let cli = Cli::try_parse_from(
        std::iter::once("city-guide".to_owned()).chain(args.iter().cloned()),
    )?;
    let mut out = Vec::new();
    run_with(cli, &mut out)?;
    Ok(serde_json::from_slice(&out).expect("command output should be JSON"))
}
