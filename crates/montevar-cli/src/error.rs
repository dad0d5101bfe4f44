//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// The price file has nothing for the requested tickers.
    #[error("No prices found for {0}")]
    NoPrices(String),

    /// Refusing to overwrite a file.
    #[error("{0} already exists (use --force to overwrite)")]
    FileExists(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
