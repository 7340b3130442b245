//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.daygroup.toml` files.

use crate::models::MeasurementKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".daygroup.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Ingest settings.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Observation log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Measurement kinds to keep.
    #[serde(default = "default_kinds")]
    pub kinds: Vec<MeasurementKind>,

    /// Show a spinner while reading.
    #[serde(default)]
    pub show_progress: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            kinds: default_kinds(),
            show_progress: false,
        }
    }
}

fn default_kinds() -> Vec<MeasurementKind> {
    MeasurementKind::ALL.to_vec()
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write groups ordered by station, kind and day.
    #[serde(default = "default_true")]
    pub sorted: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { sorted: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only explicitly given flags override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref kinds) = args.kinds {
            self.ingest.kinds = kinds.clone();
        }

        if args.progress {
            self.ingest.show_progress = true;
        }

        if args.unsorted {
            self.output.sorted = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
