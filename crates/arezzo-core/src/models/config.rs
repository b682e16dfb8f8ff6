//! Configuration structures for conversion runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ArezzoError, Result};

/// Main configuration for the arezzo converter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArezzoConfig {
    /// CSV output configuration.
    pub output: OutputConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// CSV output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output file for `convert`.
    pub path: PathBuf,

    /// Field delimiter.
    pub delimiter: char,

    /// Prefix the file with a UTF-8 byte-order mark so spreadsheet tools
    /// detect the encoding.
    pub write_bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pedidos.csv"),
            delimiter: ',',
            write_bom: true,
        }
    }
}

impl OutputConfig {
    /// Delimiter as the single byte the CSV writer expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ArezzoError::Config(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents parsed concurrently.
    pub jobs: usize,

    /// Report a malformed document and keep going instead of aborting.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            continue_on_error: true,
        }
    }
}

impl ArezzoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ArezzoError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ArezzoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ArezzoConfig =
            serde_json::from_str(r#"{"output": {"delimiter": ";"}}"#).unwrap();

        assert_eq!(config.output.delimiter, ';');
        assert!(config.output.write_bom);
        assert_eq!(config.output.path, PathBuf::from("pedidos.csv"));
        assert_eq!(config.batch, BatchConfig::default());
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(OutputConfig::default().delimiter_byte().unwrap(), b',');

        let config = OutputConfig {
            delimiter: '§',
            ..OutputConfig::default()
        };
        assert!(matches!(config.delimiter_byte(), Err(ArezzoError::Config(_))));
    }
}
