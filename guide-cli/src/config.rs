//! Layered configuration for the database location.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const DEFAULT_DATABASE: &str = "city_guide.db";

/// Database options shared by every command.
///
/// The path can come from `--database`, a configuration file, or the
/// `CITY_GUIDE_CMDS_STORE_DATABASE` environment variable, in that order of
/// precedence.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "store")]
#[ortho_config(prefix = "CITY_GUIDE")]
pub(crate) struct StoreArgs {
    /// Path to the SQLite guide database [env: CITY_GUIDE_CMDS_STORE_DATABASE]
    /// [default: city_guide.db]
    #[arg(long = ARG_DATABASE, value_name = "path", global = true)]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl StoreArgs {
    pub(crate) fn into_config(self) -> Result<StoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(StoreConfig::from(merged))
    }
}

/// Resolved database settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoreConfig {
    /// Location of the SQLite database file.
    pub(crate) database: Utf8PathBuf,
}

impl From<StoreArgs> for StoreConfig {
    fn from(args: StoreArgs) -> Self {
        Self {
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<StoreConfig, CliError> {
    let merged = StoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(StoreConfig::from(merged))
}
