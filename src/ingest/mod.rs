//! Observation log ingestion.
//!
//! Reads comma-separated station rows (`station,YYYYMMDD,KIND,value,...`)
//! and folds the accepted temperature readings into a [`Groupings`] in a
//! single pass. Rows of other kinds are skipped without inspection; rows of
//! an accepted kind that cannot be parsed stop the load.

use crate::analysis::Groupings;
use crate::error::ExtractError;
use crate::models::{MeasurementKind, Observation};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Raw values are stored in tenths of a degree.
const TENTHS_PER_DEGREE: f64 = 10.0;

/// Leading characters of a date that hold the year.
const YEAR_WIDTH: usize = 4;

const MIN_FIELDS: usize = 4;

/// Spinner refresh interval, in lines.
const PROGRESS_STEP: u64 = 10_000;

/// Settings for one ingest pass.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Measurement kinds to keep; every other kind is skipped.
    pub kinds: Vec<MeasurementKind>,
    /// Show a spinner with the number of lines read.
    pub show_progress: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            kinds: MeasurementKind::ALL.to_vec(),
            show_progress: false,
        }
    }
}

impl From<&crate::config::IngestConfig> for IngestOptions {
    fn from(config: &crate::config::IngestConfig) -> Self {
        Self {
            kinds: config.kinds.clone(),
            show_progress: config.show_progress,
        }
    }
}

/// Parse one line of the log.
///
/// Returns `Ok(None)` when the row's kind is not in `kinds`. `line_no` is
/// 1-based and only used for error reporting.
pub fn parse_line(
    line: &str,
    line_no: usize,
    kinds: &[MeasurementKind],
) -> Result<Option<Observation>, ExtractError> {
    let fields: Vec<&str> = line.trim().split(',').collect();

    if fields.len() < MIN_FIELDS {
        return Err(ExtractError::malformed(
            line_no,
            format!(
                "expected at least {} fields, found {}",
                MIN_FIELDS,
                fields.len()
            ),
        ));
    }

    let kind = match MeasurementKind::parse(fields[2]) {
        Some(kind) if kinds.contains(&kind) => kind,
        _ => return Ok(None),
    };

    let raw: f64 = fields[3].trim().parse().map_err(|_| {
        ExtractError::malformed(line_no, format!("non-numeric value '{}'", fields[3]))
    })?;

    Ok(Some(Observation {
        station_id: fields[0].to_string(),
        kind,
        day: strip_year(fields[1]).to_string(),
        value: raw / TENTHS_PER_DEGREE,
    }))
}

/// Drop the year from a `YYYYMMDD` date. Shorter dates give an empty day.
fn strip_year(date: &str) -> &str {
    date.char_indices()
        .nth(YEAR_WIDTH)
        .map(|(i, _)| &date[i..])
        .unwrap_or("")
}

/// Build groupings from any buffered reader.
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes only affect the row
/// they sit in. `source` names the reader in I/O errors.
pub fn load_reader<R: BufRead>(
    mut reader: R,
    source: &Path,
    options: &IngestOptions,
) -> Result<Groupings, ExtractError> {
    let progress = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} lines read")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Some(pb)
    } else {
        None
    };

    let mut groupings = Groupings::new();
    let mut lines = 0usize;
    let mut skipped = 0usize;

    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| ExtractError::io(source, e))?;
        if read == 0 {
            break;
        }

        let line_no = lines + 1;
        lines = line_no;
        let line = String::from_utf8_lossy(&buf);

        match parse_line(&line, line_no, &options.kinds)? {
            Some(observation) => groupings.insert(observation),
            None => skipped += 1,
        }

        if let Some(ref pb) = progress {
            if line_no as u64 % PROGRESS_STEP == 0 {
                pb.set_position(line_no as u64);
            }
        }
    }

    if let Some(pb) = progress {
        pb.set_position(lines as u64);
        pb.finish_and_clear();
    }

    debug!(
        "Read {} lines: {} readings kept, {} skipped",
        lines,
        groupings.reading_count(),
        skipped
    );

    Ok(groupings)
}

/// Build groupings from a file on disk.
pub fn load_file(path: &Path, options: &IngestOptions) -> Result<Groupings, ExtractError> {
    info!("Reading observations from: {}", path.display());

    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    load_reader(BufReader::new(file), path, options)
}
