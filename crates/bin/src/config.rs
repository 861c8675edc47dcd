//! CLI configuration.
//!
//! Resolution order: built-in defaults, then the config file (`--config`, or
//! the platform config directory if present), then command-line flags.
//! Paths in the config file are relative to `root`.

use hobart::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default price panel location under the project root.
pub(crate) const DEFAULT_PRICES: &str = "00_data/raw/prices.parquet";

/// Default factor table location under the project root.
pub(crate) const DEFAULT_FACTORS: &str = "00_data/features/factors.parquet";

/// Default summary location under the project root.
pub(crate) const DEFAULT_SUMMARY: &str = "05_reports/factors_summary.json";

/// Errors reading a config file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid config JSON
    #[error("invalid config {path}: {source}")]
    Json {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Project root.
    pub(crate) root: PathBuf,
    /// Input price panel.
    pub(crate) prices_path: PathBuf,
    /// Output factor table.
    pub(crate) factors_path: PathBuf,
    /// Output summary.
    pub(crate) summary_path: PathBuf,
    /// Gate settings.
    pub(crate) pipeline: PipelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            prices_path: PathBuf::from(DEFAULT_PRICES),
            factors_path: PathBuf::from(DEFAULT_FACTORS),
            summary_path: PathBuf::from(DEFAULT_SUMMARY),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Platform config file location.
///
/// - Linux: `~/.config/hobart/config.json`
/// - macOS: `~/Library/Application Support/hobart/config.json`
/// - Windows: `%APPDATA%\hobart\config.json`
pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hobart").join("config.json"))
}

impl Config {
    /// Load from `explicit`, else from the platform config file if it exists,
    /// else defaults. An explicit path must exist.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a JSON config file. Missing fields take their defaults.
    pub(crate) fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Input price panel, resolved against `root`.
    pub(crate) fn prices(&self) -> PathBuf {
        self.root.join(&self.prices_path)
    }

    /// Output factor table, resolved against `root`.
    pub(crate) fn factors(&self) -> PathBuf {
        self.root.join(&self.factors_path)
    }

    /// Output summary, resolved against `root`.
    pub(crate) fn summary(&self) -> PathBuf {
        self.root.join(&self.summary_path)
    }
}
