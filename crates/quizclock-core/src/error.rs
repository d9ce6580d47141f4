//! Error types for loading questions and reading the console.
//!
//! A [`LoadError`] is fatal: the session never reaches its timed phase.
//! A [`ReadError`] from the input listener is transient and only logged.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the question source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The question file could not be opened or read.
    #[error("failed to open question source {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed CSV (bad quoting, uneven record lengths).
    #[error("malformed question source {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record does not carry both a prompt and an answer.
    #[error("record {record} is missing its {field} field")]
    MissingField { record: usize, field: &'static str },
}

/// Failure to read a line from the console.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Input reached end-of-file.
    #[error("console input closed")]
    Closed,

    /// The underlying read failed.
    #[error("console read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadError {
    /// Returns `true` if no further input can ever arrive.
    pub fn is_closed(&self) -> bool {
        matches!(self, ReadError::Closed)
    }
}
