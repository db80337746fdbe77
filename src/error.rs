//! Crate error type.
//!
//! Core evaluation (conflicts, filters, aggregates) is total and never
//! fails. Errors come from invalid configuration handed to the core and
//! from the I/O periphery (catalog loading, export).

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::MilitaryTime;

/// Errors produced by `u-timetable`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid military time {0}: expected hhmm in 0..=2359")]
    InvalidTime(i64),

    #[error("invalid filter window: before ({before}) is later than after ({after})")]
    InvalidFilter {
        before: MilitaryTime,
        after: MilitaryTime,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("worksheet not found: {0}")]
    MissingSheet(String),

    #[error("catalog header is missing column '{0}'")]
    MissingColumn(String),

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
