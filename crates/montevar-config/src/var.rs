//! Value at Risk run configuration.
//!
//! This module defines the single configuration structure that drives an
//! end-to-end Monte Carlo VaR estimate.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use montevar_core::{CoreResult, Date, InstrumentId};

use crate::error::{ConfigResult, Validate, ValidationError};

/// Maximum absolute deviation of the weight sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Longest accepted history window in calendar days (200 years).
pub const MAX_LOOKBACK_DAYS: u32 = 200 * 365;

// =============================================================================
// VAR CONFIGURATION
// =============================================================================

/// Configuration of one Monte Carlo Value at Risk run.
///
/// Every field has a default so a TOML file only needs to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaRConfig {
    /// Instruments in the portfolio, in weight order.
    pub tickers: Vec<InstrumentId>,

    /// Calendar days of price history before `end_date` to use.
    pub lookback_days: u32,

    /// Last date of the history window (None = latest available date).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Per-instrument weights (None = equal weight).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,

    /// Nominal portfolio exposure the scenarios are expressed in.
    pub portfolio_value: f64,

    /// Number of Monte Carlo scenarios.
    pub simulation_count: usize,

    /// Horizon of each scenario in trading days.
    pub horizon_days: u32,

    /// Confidence level of the VaR quantile, strictly between 0 and 1.
    pub confidence_level: f64,

    /// Random seed for reproducibility (None = fresh entropy per run).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Spread scenario generation across threads.
    pub parallel: bool,
}

fn default_tickers() -> Vec<InstrumentId> {
    ["SPY", "BND", "GLD", "QQQ", "VTI"]
        .into_iter()
        .filter_map(|t| InstrumentId::new(t).ok())
        .collect()
}

const DEFAULT_LOOKBACK_DAYS: u32 = 15 * 365;
const DEFAULT_PORTFOLIO_VALUE: f64 = 1.0;
const DEFAULT_SIMULATION_COUNT: usize = 1000;
const DEFAULT_HORIZON_DAYS: u32 = 5;
const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

impl Default for VaRConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            end_date: None,
            weights: None,
            portfolio_value: DEFAULT_PORTFOLIO_VALUE,
            simulation_count: DEFAULT_SIMULATION_COUNT,
            horizon_days: DEFAULT_HORIZON_DAYS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
            parallel: false,
        }
    }
}

impl VaRConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Explicit weights, or `1/N` for each of the N tickers.
    pub fn resolved_weights(&self) -> Vec<f64> {
        match &self.weights {
            Some(weights) => weights.clone(),
            None => {
                let n = self.tickers.len();
                vec![1.0 / n as f64; n]
            }
        }
    }

    /// First date of the history window given the window's last date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the lookback reaches past the
    /// supported date range.
    pub fn start_date(&self, end: Date) -> CoreResult<Date> {
        end.checked_add_days(-i64::from(self.lookback_days))
    }

    /// Builder method to set the tickers.
    pub fn with_tickers<I, S>(mut self, tickers: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tickers = tickers
            .into_iter()
            .map(InstrumentId::new)
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Builder method to set explicit weights.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Builder method to set the lookback window.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Builder method to set the window end date.
    pub fn with_end_date(mut self, end: Date) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Builder method to set the portfolio value.
    pub fn with_portfolio_value(mut self, value: f64) -> Self {
        self.portfolio_value = value;
        self
    }

    /// Builder method to set the number of scenarios.
    pub fn with_simulation_count(mut self, count: usize) -> Self {
        self.simulation_count = count;
        self
    }

    /// Builder method to set the horizon.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Builder method to set the confidence level.
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Builder method to set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to toggle parallel scenario generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Validate for VaRConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.tickers.is_empty() {
            errors.push(ValidationError::with_rule(
                "tickers",
                "At least one ticker is required",
                "non_empty_tickers",
            ));
        }

        let mut seen = HashSet::new();
        for ticker in &self.tickers {
            if !seen.insert(ticker) {
                errors.push(ValidationError::with_rule(
                    "tickers",
                    format!("Duplicate ticker {ticker}"),
                    "unique_tickers",
                ));
            }
        }

        if self.lookback_days == 0 {
            errors.push(ValidationError::with_rule(
                "lookback_days",
                "Lookback must be at least one day",
                "positive_lookback",
            ));
        } else if self.lookback_days > MAX_LOOKBACK_DAYS {
            errors.push(ValidationError::with_rule(
                "lookback_days",
                format!(
                    "Lookback of {} days exceeds the maximum of {MAX_LOOKBACK_DAYS}",
                    self.lookback_days
                ),
                "bounded_lookback",
            ));
        }

        if let Some(weights) = &self.weights {
            if weights.len() != self.tickers.len() {
                errors.push(ValidationError::with_rule(
                    "weights",
                    format!(
                        "Expected {} weights, got {}",
                        self.tickers.len(),
                        weights.len()
                    ),
                    "weights_match_tickers",
                ));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                errors.push(ValidationError::with_rule(
                    "weights",
                    "Weights must be finite and non-negative",
                    "non_negative_weights",
                ));
            }
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                errors.push(ValidationError::with_rule(
                    "weights",
                    format!("Weights must sum to 1, got {sum}"),
                    "weights_sum_to_one",
                ));
            }
        }

        if !self.portfolio_value.is_finite() || self.portfolio_value <= 0.0 {
            errors.push(ValidationError::with_rule(
                "portfolio_value",
                "Portfolio value must be positive",
                "positive_value",
            ));
        }

        if self.simulation_count == 0 {
            errors.push(ValidationError::with_rule(
                "simulation_count",
                "At least one simulation is required",
                "positive_simulations",
            ));
        }

        if self.horizon_days == 0 {
            errors.push(ValidationError::with_rule(
                "horizon_days",
                "Horizon must be at least one day",
                "positive_horizon",
            ));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            errors.push(ValidationError::with_rule(
                "confidence_level",
                "Confidence level must be strictly between 0 and 1",
                "valid_confidence",
            ));
        }

        errors
    }
}
