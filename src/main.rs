//! daygroup - calendar-day grouping of station temperature logs
//!
//! A CLI tool that reads a comma-separated weather observation log, groups
//! TMAX/TMIN readings by station, kind and month-day across years, and
//! writes the groups with enough readings as flat numeric rows.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Usage error, malformed input, or I/O failure

mod analysis;
mod cli;
mod config;
mod error;
mod ingest;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use error::ExtractError;
use ingest::IngestOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Missing positionals: usage on stdout, no file I/O
    if let Err(e) = args.validate() {
        println!("{}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(log_level(&args, &config));

    info!("daygroup v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration from: {}", config_source);

    match run(&args, &config) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Extraction failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .daygroup.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging. Logs go to stderr; stdout carries the status lines.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// CLI flags win over the config file's verbose setting.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Load configuration from file or use defaults. Also returns where it came from.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => Ok((config, DEFAULT_CONFIG_FILE.to_string())),
        None => Ok((Config::default(), "built-in defaults".to_string())),
    }
}

/// Run one extraction: load, count, write. Returns the number of qualifying groups.
fn run(args: &Args, config: &Config) -> Result<usize> {
    let input = args.input();
    let min_samples = args.min_samples();

    println!("Process file: {} {}", input, min_samples);

    // Resolve the output path before reading so a bad name fails fast
    let output = if args.count_only {
        None
    } else {
        Some(output_path(args)?)
    };

    let options = IngestOptions::from(&config.ingest);

    println!("Loading file ... ");
    let groupings = ingest::load_file(Path::new(input), &options)
        .with_context(|| format!("Failed to load observations from {}", input))?;
    println!("Finish loading file ... ");

    if groupings.is_empty() {
        warn!("No readings of the selected kinds found in {}", input);
    }

    let summary = groupings.summary(min_samples);
    debug!(
        "{} stations, {} groups, {} readings",
        summary.stations, summary.groups, summary.readings
    );
    println!("tuples: {}", summary.qualifying);

    if let Some(path) = output {
        let rows = report::write_file(&path, &groupings, min_samples, config.output.sorted)
            .with_context(|| format!("Failed to write rows to {}", path.display()))?;
        debug_assert_eq!(rows, summary.qualifying);
        println!("Output written to: {}", path.display());
    } else {
        info!("Count only: no output file written");
    }

    Ok(summary.qualifying)
}

fn output_path(args: &Args) -> Result<PathBuf, ExtractError> {
    match args.output {
        Some(ref path) => Ok(path.clone()),
        None => report::derive_output_path(args.input()),
    }
}
