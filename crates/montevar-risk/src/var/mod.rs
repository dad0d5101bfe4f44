//! Value at Risk (VaR) estimation.
//!
//! VaR estimates the potential loss over a specified time horizon
//! at a given confidence level.

mod monte_carlo;

pub use monte_carlo::*;

use serde::{Deserialize, Serialize};

/// Value at Risk result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// The VaR value (negated lower-tail quantile of the outcomes)
    pub var: f64,
    /// The lower-tail quantile of the simulated outcomes
    pub quantile: f64,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
}

impl VaRResult {
    /// Tail probability `1 - confidence_level`.
    pub fn tail_probability(&self) -> f64 {
        1.0 - self.confidence_level
    }

    /// Percentile rank used for the quantile, in percent.
    pub fn percentile_rank(&self) -> f64 {
        self.tail_probability() * 100.0
    }
}

impl std::fmt::Display for VaRResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VaR({:.0}%): {:.6}", self.confidence_level * 100.0, self.var)
    }
}
