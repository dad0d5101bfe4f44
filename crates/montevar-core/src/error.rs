//! Error types for the Montevar core types.
//!
//! Every variant describes a malformed input handed to the library by a
//! data provider or caller.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core type construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date parsing or an invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A price that is not strictly positive and finite.
    #[error("Invalid price for {instrument} on {date}: {value}")]
    InvalidPrice {
        /// Instrument the price belongs to.
        instrument: String,
        /// Observation date.
        date: String,
        /// The offending value.
        value: f64,
    },

    /// Dates in a series are not strictly increasing.
    #[error("Price series for {instrument} is not strictly increasing at {date}")]
    UnorderedSeries {
        /// Instrument the series belongs to.
        instrument: String,
        /// First date that breaks the ordering.
        date: String,
    },

    /// The same instrument was supplied twice.
    #[error("Duplicate instrument: {instrument}")]
    DuplicateInstrument {
        /// The repeated identifier.
        instrument: String,
    },

    /// An instrument was requested that has no series.
    #[error("Unknown instrument: {instrument}")]
    UnknownInstrument {
        /// The missing identifier.
        instrument: String,
    },

    /// Instrument identifiers must be non-empty.
    #[error("Instrument identifier cannot be empty")]
    EmptyIdentifier,
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unknown instrument error.
    #[must_use]
    pub fn unknown_instrument(instrument: impl Into<String>) -> Self {
        Self::UnknownInstrument {
            instrument: instrument.into(),
        }
    }
}
