//! Command-line behaviour of the built binary.
//!
//! Each test runs the executable in a fresh temporary directory so the
//! files it creates (or must not create) can be checked directly.

use std::path::Path;
use std::process::{Command, Output};

fn daygroup(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daygroup"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run daygroup")
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_single_argument_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("weather.csv"), "USW001,20200101,TMAX,100\n").unwrap();

    let output = daygroup(dir.path(), &["weather.csv"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("<file> <min-samples>"));
    assert_eq!(entries(dir.path()), vec!["weather.csv"]);
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();

    let output = daygroup(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_writes_derived_output_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("weather.csv"),
        "USW001,20200101,TMAX,100,,,S,\nUSW001,20210101,TMAX,110,,,S,\n",
    )
    .unwrap();

    let output = daygroup(dir.path(), &["weather.csv", "2"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loading file ..."));
    assert!(stdout.contains("Finish loading file ..."));
    assert!(stdout.contains("tuples: 1"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("weather")).unwrap(),
        "10.0,11.0,\n"
    );
}

#[test]
fn test_malformed_row_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("weather.csv"), "USW001,20200101,TMAX,warm\n").unwrap();

    let output = daygroup(dir.path(), &["weather.csv", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
}
