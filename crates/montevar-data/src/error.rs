//! Error types for price sources.

use thiserror::Error;

use montevar_core::{CoreError, Date};

/// A specialized Result type for price sources.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while loading or querying price data.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell could not be parsed
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the file.
        line: u64,
        /// What went wrong.
        message: String,
    },

    /// The header does not describe a known layout
    #[error("unrecognised header: {0}")]
    InvalidHeader(String),

    /// Start date after end date
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested start.
        start: Date,
        /// Requested end.
        end: Date,
    },

    /// Loaded data violates a price invariant
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DataError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
