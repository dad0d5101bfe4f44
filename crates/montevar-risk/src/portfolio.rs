//! Portfolio-level risk aggregation.
//!
//! Collapses per-instrument statistics into a single expected return and
//! standard deviation for a weighted portfolio.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use montevar_config::WEIGHT_SUM_TOLERANCE;
use montevar_math::linear_algebra::{dot, quadratic_form};

use crate::returns::ReturnStatistics;
use crate::{RiskError, RiskResult};

/// Portfolio weights, one per instrument in statistics order.
///
/// Construction does not validate; [`WeightVector::validate`] is applied by
/// the aggregator so that violations surface as [`RiskError`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Wraps explicit weights.
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    /// `1/n` for each of `n` instruments.
    pub fn equal(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// The weights as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the weight invariants against an instrument count.
    ///
    /// # Errors
    ///
    /// - `RiskError::DimensionMismatch` if the length differs from `instruments`
    /// - `RiskError::InvalidWeight` for a negative or non-finite weight, or a
    ///   sum further than [`WEIGHT_SUM_TOLERANCE`] from 1
    pub fn validate(&self, instruments: usize) -> RiskResult<()> {
        if self.0.len() != instruments {
            return Err(RiskError::DimensionMismatch {
                expected: instruments,
                actual: self.0.len(),
            });
        }

        if let Some((i, w)) = self
            .0
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(RiskError::invalid_weight(format!(
                "weight {i} is {w}, weights must be finite and non-negative"
            )));
        }

        let sum: f64 = self.0.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RiskError::invalid_weight(format!(
                "weights sum to {sum}, expected 1"
            )));
        }

        Ok(())
    }

    fn to_dvector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.0)
    }
}

impl From<Vec<f64>> for WeightVector {
    fn from(weights: Vec<f64>) -> Self {
        Self(weights)
    }
}

/// Expected return and standard deviation of a weighted portfolio.
///
/// Both values are per return period of the underlying statistics
/// (daily for daily prices).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRiskProfile {
    /// `mean · w`
    pub expected_return: f64,
    /// `sqrt(wᵀ Σ w)`, never negative.
    pub std_dev: f64,
}

impl PortfolioRiskProfile {
    /// Aggregates a mean vector and covariance matrix with `weights`.
    ///
    /// A slightly negative quadratic form caused by rounding is clamped to
    /// zero before the square root.
    ///
    /// # Errors
    ///
    /// See [`WeightVector::validate`]; also `RiskError::InvalidInput` if the
    /// covariance matrix is not `n x n` for a mean vector of length `n`.
    pub fn aggregate(
        mean: &DVector<f64>,
        covariance: &DMatrix<f64>,
        weights: &WeightVector,
    ) -> RiskResult<Self> {
        let n = mean.len();
        if covariance.nrows() != n || covariance.ncols() != n {
            return Err(RiskError::invalid_input(format!(
                "covariance matrix is {}x{}, expected {n}x{n} to match the mean vector",
                covariance.nrows(),
                covariance.ncols()
            )));
        }
        weights.validate(n)?;

        let w = weights.to_dvector();
        let expected_return = dot(mean, &w)?;
        let variance = quadratic_form(&w, covariance)?;

        if variance < 0.0 {
            tracing::warn!(variance, "clamped negative portfolio variance to zero");
        }

        Ok(Self {
            expected_return,
            std_dev: variance.max(0.0).sqrt(),
        })
    }

    /// Aggregates precomputed return statistics.
    pub fn from_statistics(stats: &ReturnStatistics, weights: &WeightVector) -> RiskResult<Self> {
        Self::aggregate(stats.mean(), stats.covariance(), weights)
    }

    /// Portfolio variance.
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}
