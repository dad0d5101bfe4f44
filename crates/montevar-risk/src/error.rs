//! Error types for risk calculations.
//!
//! All variants are caller contract violations surfaced immediately; none
//! is transient and nothing is retried.

use thiserror::Error;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Fewer valid return rows than the statistics need.
    #[error("insufficient data: need at least {required} valid return rows, got {actual}")]
    InsufficientData {
        /// Minimum number of rows.
        required: usize,
        /// Rows left after dropping undefined values.
        actual: usize,
    },

    /// Weight vector and statistics disagree on the instrument count.
    #[error("dimension mismatch: expected {expected} weights, got {actual}")]
    DimensionMismatch {
        /// Number of instruments.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// Weights are negative, non-finite, or do not sum to 1.
    #[error("invalid weights: {0}")]
    InvalidWeight(String),

    /// Simulation count must be positive.
    #[error("invalid simulation count: {count} (must be positive)")]
    InvalidSimulationCount {
        /// The rejected count.
        count: usize,
    },

    /// Confidence level outside (0, 1).
    #[error("invalid confidence level: {level} (must be strictly between 0 and 1)")]
    InvalidConfidenceLevel {
        /// The rejected level.
        level: f64,
    },

    /// VaR requested on an empty scenario set.
    #[error("empty scenario set")]
    EmptyScenarioSet,

    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Price data could not be used.
    #[error("price data error: {0}")]
    Data(#[from] montevar_core::CoreError),

    /// Numerical routine failed.
    #[error("math error: {0}")]
    Math(#[from] montevar_math::MathError),
}

impl RiskError {
    /// Creates an invalid weight error.
    #[must_use]
    pub fn invalid_weight(reason: impl Into<String>) -> Self {
        Self::InvalidWeight(reason.into())
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
