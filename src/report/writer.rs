//! Flat row output.
//!
//! Each qualifying group becomes one line of comma-terminated decimal
//! values (`10.0,11.0,`). There is no header and no group identifier.

use crate::analysis::Groupings;
use crate::error::ExtractError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output path for an input argument: everything from the first `.` is dropped.
///
/// The rule applies to the argument as given, so `data/obs.2020.csv`
/// becomes `data/obs` and `./obs.csv` has no usable prefix.
pub fn derive_output_path(input: &str) -> Result<PathBuf, ExtractError> {
    let stem = input.split('.').next().unwrap_or("");

    if stem.is_empty() {
        return Err(ExtractError::EmptyOutputPath {
            input: input.to_string(),
        });
    }

    Ok(PathBuf::from(stem))
}

/// Render the readings of one group as a single output line (without newline).
pub fn format_row(values: &[f64]) -> String {
    let mut row = String::new();
    for value in values {
        row.push_str(&format_value(*value));
        row.push(',');
    }
    row
}

/// Shortest round-trip form of a reading.
///
/// Whole numbers keep their fraction (`10.0`). Very large or small values
/// use a signed exponent of at least two digits (`1e+16`, `2.5e-07`).
fn format_value(value: f64) -> String {
    // Debug goes scientific below 1e-4 and from 1e16 up
    let text = format!("{:?}", value);

    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Write every group with at least `min_samples` readings. Returns rows written.
pub fn write_rows<W: Write>(
    mut writer: W,
    groupings: &Groupings,
    min_samples: usize,
    sorted: bool,
) -> std::io::Result<usize> {
    let groups: Vec<_> = if sorted {
        groupings.qualifying_sorted(min_samples)
    } else {
        groupings.qualifying(min_samples).collect()
    };

    for (key, values) in &groups {
        debug!("Writing {} ({} readings)", key, values.len());
        writeln!(writer, "{}", format_row(values))?;
    }

    writer.flush()?;
    Ok(groups.len())
}

/// Create (or truncate) `path` and write the qualifying rows to it.
pub fn write_file(
    path: &Path,
    groupings: &Groupings,
    min_samples: usize,
    sorted: bool,
) -> Result<usize, ExtractError> {
    let file = File::create(path).map_err(|e| ExtractError::io(path, e))?;
    let rows = write_rows(BufWriter::new(file), groupings, min_samples, sorted)
        .map_err(|e| ExtractError::io(path, e))?;

    info!("Wrote {} rows to: {}", rows, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupKey, MeasurementKind};

    fn scenario() -> Groupings {
        let mut g = Groupings::new();
        let key = GroupKey::new("USW001", MeasurementKind::Tmax, "0101");
        g.push(key.clone(), 10.0);
        g.push(key, 11.0);
        g
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(derive_output_path("weather.csv").unwrap(), PathBuf::from("weather"));
        assert_eq!(derive_output_path("weather").unwrap(), PathBuf::from("weather"));
        assert_eq!(
            derive_output_path("data/obs.2020.csv").unwrap(),
            PathBuf::from("data/obs")
        );
    }

    #[test]
    fn test_derive_output_path_empty() {
        assert!(matches!(
            derive_output_path("./obs.csv"),
            Err(ExtractError::EmptyOutputPath { .. })
        ));
        assert!(derive_output_path("").is_err());
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&[10.0, 11.0]), "10.0,11.0,");
        assert_eq!(format_row(&[21.3, -5.0]), "21.3,-5.0,");
        assert_eq!(format_row(&[]), "");
    }

    #[test]
    fn test_format_value_exponents() {
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(-1.5e20), "-1.5e+20");
        assert_eq!(format_value(2.5e-7), "2.5e-07");
        assert_eq!(format_value(1e100), "1e+100");
        assert_eq!(format_value(10.05), "10.05");
        assert_eq!(format_row(&[1e16, 0.1]), "1e+16,0.1,");
    }

    #[test]
    fn test_write_rows_scenario_a() {
        let mut out = Vec::new();
        let rows = write_rows(&mut out, &scenario(), 2, true).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "10.0,11.0,\n");
    }

    #[test]
    fn test_write_rows_scenario_b() {
        let mut out = Vec::new();
        let rows = write_rows(&mut out, &scenario(), 3, true).unwrap();
        assert_eq!(rows, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rows_are_not_truncated() {
        let mut g = scenario();
        g.push(GroupKey::new("USW001", MeasurementKind::Tmax, "0101"), 12.5);
        g.push(GroupKey::new("USW001", MeasurementKind::Tmin, "0101"), 1.0);

        let mut out = Vec::new();
        let rows = write_rows(&mut out, &g, 2, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, g.count_qualifying(2));
        assert_eq!(text, "10.0,11.0,12.5,\n");
        let fields = text.trim_end().trim_end_matches(',').split(',').count();
        assert_eq!(fields, 3);
    }

    #[test]
    fn test_write_file_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather");
        std::fs::write(&path, "stale content that is longer than the new output\n").unwrap();

        let rows = write_file(&path, &scenario(), 2, true).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "10.0,11.0,\n");
    }

    #[test]
    fn test_write_file_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("weather");
        let err = write_file(&path, &scenario(), 1, true).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
