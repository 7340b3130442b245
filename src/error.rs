//! Error types for extraction.
//!
//! Domain failures are typed here; the binary wraps them in `anyhow`
//! with extra context where it orchestrates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading observations or writing grouped rows.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Not enough positional arguments were given.
    #[error("Usage: {program} <file> <min-samples>")]
    Usage { program: String },

    /// A data line that cannot be turned into an observation.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// The output path derived from the input name came out empty.
    #[error("Cannot derive an output path from '{input}'")]
    EmptyOutputPath { input: String },

    #[error("I/O error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
