//! Subcommands of the `arezzo` binary.

pub mod config;
pub mod convert;
pub mod filter;
pub mod show;

use std::path::{Path, PathBuf};

use arezzo_core::ArezzoConfig;
use tracing::debug;

/// Output format for commands printing rows.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of rows
    Json,
    /// Delimited text with header row
    Csv,
    /// Plain text listing grouped by order
    Text,
}

/// Location used when no `--config` is given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arezzo")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ArezzoConfig> {
    if let Some(path) = config_path {
        return Ok(ArezzoConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using configuration from {}", path.display());
        Ok(ArezzoConfig::from_file(&path)?)
    } else {
        Ok(ArezzoConfig::default())
    }
}
