//! Descriptive statistics over samples and observation tables.
//!
//! Observation tables are `ndarray` matrices with one row per observation
//! and one column per variable.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

/// Arithmetic mean of a non-empty sample.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Column-wise arithmetic means of an observation table.
pub fn column_means(data: &Array2<f64>) -> MathResult<DVector<f64>> {
    let n = data.nrows();
    if n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }

    Ok(DVector::from_iterator(
        data.ncols(),
        data.columns().into_iter().map(|col| col.sum() / n as f64),
    ))
}

/// Sample covariance matrix (divisor `n - 1`) of an observation table.
///
/// Only the upper triangle is computed; the lower triangle is mirrored so
/// the result is exactly symmetric.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` with fewer than two rows.
pub fn sample_covariance(data: &Array2<f64>) -> MathResult<DMatrix<f64>> {
    let n = data.nrows();
    let k = data.ncols();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let means = column_means(data)?;
    let denom = (n - 1) as f64;
    let mut cov = DMatrix::zeros(k, k);

    for i in 0..k {
        for j in i..k {
            let mut sum = 0.0;
            for t in 0..n {
                sum += (data[[t, i]] - means[i]) * (data[[t, j]] - means[j]);
            }
            let value = sum / denom;
            cov[(i, j)] = value;
            cov[(j, i)] = value;
        }
    }

    Ok(cov)
}

/// The `pct`-th percentile (0..=100) of a sample using linear
/// interpolation between closest ranks.
///
/// With the sample sorted ascending as `x[0..n]`, the rank is
/// `r = pct / 100 * (n - 1)` and the result is
/// `x[floor(r)] + (x[ceil(r)] - x[floor(r)]) * (r - floor(r))`.
///
/// # Example
///
/// ```rust
/// use montevar_math::statistics::percentile;
///
/// let xs = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&xs, 50.0).unwrap(), 2.5);
/// assert_eq!(percentile(&xs, 0.0).unwrap(), 1.0);
/// ```
pub fn percentile(values: &[f64], pct: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("sample contains NaN"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, pct)
}

/// Same as [`percentile`] for a sample already sorted ascending.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(MathError::invalid_input(format!(
            "percentile must be within [0, 100], got {pct}"
        )));
    }

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
