//! Return statistics from price history.
//!
//! Turns a [`PriceHistory`] into a table of daily log-returns and derives
//! the per-instrument mean return vector and the sample covariance matrix.

use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

use montevar_core::{Date, InstrumentId, PriceHistory};
use montevar_math::statistics::{column_means, sample_covariance};

use crate::{RiskError, RiskResult};

/// Minimum number of return rows for a sample covariance.
pub const MIN_RETURN_ROWS: usize = 2;

/// Log-returns `ln(p[t] / p[t-1])`, one row per date and one column per
/// instrument.
///
/// Rows with an undefined cell (an instrument missing a price on that date
/// or the previous one) are dropped during construction, so every stored
/// value is finite.
#[derive(Debug, Clone)]
pub struct LogReturnMatrix {
    instruments: Vec<InstrumentId>,
    dates: Vec<Date>,
    values: Array2<f64>,
    dropped_rows: usize,
}

impl LogReturnMatrix {
    /// Computes log-returns from a price history.
    ///
    /// The first date never produces a row since it has no predecessor.
    /// For aligned series the result has `len - 1` rows.
    pub fn from_history(history: &PriceHistory) -> RiskResult<Self> {
        if history.is_empty() {
            return Err(RiskError::invalid_input("price history has no instruments"));
        }

        let aligned = history.align();
        let k = aligned.n_instruments();
        let rows = aligned.rows();

        let mut dates = Vec::with_capacity(rows.len().saturating_sub(1));
        let mut flat = Vec::with_capacity(rows.len().saturating_sub(1) * k);
        let mut dropped_rows = 0;

        for (t, pair) in rows.windows(2).enumerate() {
            let row: Option<Vec<f64>> = pair[0]
                .iter()
                .zip(&pair[1])
                .map(|(prev, cur)| match (prev, cur) {
                    (Some(p0), Some(p1)) => Some((p1 / p0).ln()),
                    _ => None,
                })
                .collect();

            match row {
                Some(values) => {
                    dates.push(aligned.dates()[t + 1]);
                    flat.extend(values);
                }
                None => dropped_rows += 1,
            }
        }

        if dropped_rows > 0 {
            tracing::warn!(
                dropped_rows,
                kept_rows = dates.len(),
                "dropped return rows with missing prices"
            );
        }

        let values = Array2::from_shape_vec((dates.len(), k), flat)
            .map_err(|e| RiskError::invalid_input(e.to_string()))?;

        Ok(Self {
            instruments: aligned.instruments().to_vec(),
            dates,
            values,
            dropped_rows,
        })
    }

    /// Instrument (column) order.
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Date of each row (the date of the later price).
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The return table.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of valid rows.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of instruments.
    pub fn n_instruments(&self) -> usize {
        self.values.ncols()
    }

    /// Rows discarded because of undefined values (excluding the first date).
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Returns of a single instrument.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.n_instruments()).then(|| self.values.column(index).to_vec())
    }
}

/// Mean return vector and covariance matrix over the same return rows.
#[derive(Debug, Clone)]
pub struct ReturnStatistics {
    instruments: Vec<InstrumentId>,
    mean: DVector<f64>,
    covariance: DMatrix<f64>,
    observations: usize,
}

impl ReturnStatistics {
    /// Derives statistics from a log-return table.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` with fewer than two rows.
    pub fn from_returns(returns: &LogReturnMatrix) -> RiskResult<Self> {
        let rows = returns.n_rows();
        if rows < MIN_RETURN_ROWS {
            return Err(RiskError::InsufficientData {
                required: MIN_RETURN_ROWS,
                actual: rows,
            });
        }

        let mean = column_means(returns.values())?;
        let covariance = sample_covariance(returns.values())?;

        tracing::debug!(
            instruments = returns.n_instruments(),
            observations = rows,
            "computed return statistics"
        );

        Ok(Self {
            instruments: returns.instruments().to_vec(),
            mean,
            covariance,
            observations: rows,
        })
    }

    /// Computes log-returns and statistics in one step.
    pub fn from_history(history: &PriceHistory) -> RiskResult<Self> {
        Self::from_returns(&LogReturnMatrix::from_history(history)?)
    }

    /// Instrument order shared by the mean vector and covariance matrix.
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Per-instrument mean log-return.
    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    /// Sample covariance of log-returns.
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Number of return rows the statistics were computed from.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Number of instruments.
    pub fn n_instruments(&self) -> usize {
        self.mean.len()
    }

    /// Per-instrument standard deviation (square root of the diagonal).
    pub fn std_devs(&self) -> Vec<f64> {
        self.covariance.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    /// Pearson correlation between two instruments.
    ///
    /// Zero when either instrument has zero variance.
    pub fn correlation(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.n_instruments();
        if i >= n || j >= n {
            return None;
        }
        let denom = (self.covariance[(i, i)] * self.covariance[(j, j)]).sqrt();
        if denom == 0.0 {
            return Some(0.0);
        }
        Some(self.covariance[(i, j)] / denom)
    }
}
