//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::error::ExtractError;
use crate::models::MeasurementKind;
use clap::Parser;
use std::path::PathBuf;

/// daygroup - group station temperatures by calendar day
///
/// Reads a comma-separated observation log (station,YYYYMMDD,KIND,value,...),
/// groups TMAX/TMIN readings by station, kind and month-day across years, and
/// writes every group with at least <MIN_SAMPLES> readings as one row.
///
/// The output file is the input name cut at its first '.', e.g.
/// `daygroup weather.csv 30` writes `weather`.
///
/// Examples:
///   daygroup weather.csv 30
///   daygroup weather.csv 30 --kinds TMAX --output tmax_rows
///   daygroup weather.csv 10 --count-only
///   daygroup --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Observation log to read
    #[arg(value_name = "FILE")]
    pub input: Option<String>,

    /// Minimum number of readings a group needs to be written
    #[arg(value_name = "MIN_SAMPLES")]
    pub min_samples: Option<usize>,

    /// Output file path, instead of the one derived from FILE
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .daygroup.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Measurement kinds to keep (comma-separated)
    ///
    /// Example: --kinds TMAX
    #[arg(long, value_name = "KINDS", value_delimiter = ',', value_parser = parse_kind)]
    pub kinds: Option<Vec<MeasurementKind>>,

    /// Report the number of qualifying groups without writing the output file
    #[arg(long)]
    pub count_only: bool,

    /// Write groups in hash order instead of sorted by station, kind and day
    #[arg(long)]
    pub unsorted: bool,

    /// Show a spinner while reading the input
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .daygroup.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

fn parse_kind(s: &str) -> Result<MeasurementKind, String> {
    MeasurementKind::parse(s.trim())
        .ok_or_else(|| format!("unknown measurement kind '{}' (expected TMAX or TMIN)", s))
}

/// Name the binary was invoked as, for the usage line.
pub fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    ///
    /// Both positionals are required unless `--init-config` is given.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none() || self.min_samples.is_none() {
            return Err(ExtractError::Usage {
                program: program_name(),
            });
        }

        Ok(())
    }

    /// Input path as given on the command line (empty if not validated).
    pub fn input(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    /// Threshold as given on the command line (0 if not validated).
    pub fn min_samples(&self) -> usize {
        self.min_samples.unwrap_or(0)
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
