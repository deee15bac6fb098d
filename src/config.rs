//! Extraction settings loaded from `~/.config/tablift/config.toml`.
//!
//! ```toml
//! [thresholds]
//! row_bucket = 3
//! gap = 20
//! cell_delta = 2
//! gap_mode = "enforced"   # or "disabled"
//!
//! [output]
//! format = "markdown"
//! ```
//!
//! Every key is optional; omitted keys keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sink::SinkFormat;

/// Default height (document units) of a quantized row bucket.
pub const DEFAULT_ROW_BUCKET: i64 = 3;

/// Default vertical distance above which two rows belong to different tables.
pub const DEFAULT_GAP: i64 = 20;

/// Largest accepted row bucket height.
pub const MAX_ROW_BUCKET: i64 = 1_000_000;

/// Default cell-count change above which a new table starts.
pub const DEFAULT_CELL_DELTA: usize = 2;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Whether the vertical-gap rule takes part in table segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapMode {
    /// Rows further apart than [`Thresholds::gap`] start a new table.
    #[default]
    Enforced,
    /// Only column-count changes split tables.
    Disabled,
}

/// Heuristic thresholds for row grouping and table segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Height of a quantized row bucket. Tokens whose `y` rounds to the same
    /// multiple of this value share a row.
    pub row_bucket: i64,
    /// Maximum vertical distance between consecutive rows of one table.
    pub gap: i64,
    /// Maximum cell-count change between consecutive rows of one table.
    pub cell_delta: usize,
    pub gap_mode: GapMode,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            row_bucket: DEFAULT_ROW_BUCKET,
            gap: DEFAULT_GAP,
            cell_delta: DEFAULT_CELL_DELTA,
            gap_mode: GapMode::Enforced,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ROW_BUCKET).contains(&self.row_bucket) {
            return Err(ConfigError::Invalid(format!(
                "row_bucket must be between 1 and {MAX_ROW_BUCKET}, got {}",
                self.row_bucket
            )));
        }
        if self.gap < 0 {
            return Err(ConfigError::Invalid(format!(
                "gap must not be negative, got {}",
                self.gap
            )));
        }
        Ok(())
    }
}

/// Output defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: SinkFormat,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub thresholds: Thresholds,
    pub output: OutputConfig,
}

impl ExtractConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist (configuration is optional).
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. Unlike [`ExtractConfig::load`], a missing
    /// file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render as TOML (for `tablift config`).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tablift")
        .join("config.toml")
}
