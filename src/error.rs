//! Errors at the input boundary
//!
//! The scorers themselves cannot fail; everything that can go wrong happens
//! while reading records.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading library records
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Invalid library record in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp '{value}': expected RFC 3339 (e.g. 2024-01-31T12:00:00Z)")]
    InvalidTimestamp { value: String },
}

pub type InputResult<T> = Result<T, InputError>;
