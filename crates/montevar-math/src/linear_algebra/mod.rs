//! Linear algebra utilities.
//!
//! Small, dimension-checked routines over `nalgebra` dense types. Shapes
//! are validated up front so a mismatched weight vector surfaces as a
//! [`MathError::DimensionMismatch`] rather than a panic inside nalgebra.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Dot product of two vectors of equal length.
///
/// # Example
///
/// ```rust
/// use montevar_math::linear_algebra::dot;
/// use nalgebra::DVector;
///
/// let a = DVector::from_vec(vec![1.0, 2.0, 3.0]);
/// let b = DVector::from_vec(vec![4.0, 5.0, 6.0]);
/// assert_eq!(dot(&a, &b).unwrap(), 32.0);
/// ```
pub fn dot(a: &DVector<f64>, b: &DVector<f64>) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::dimension_mismatch((a.len(), 1), (b.len(), 1)));
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Matrix-vector product `M * v`.
pub fn mat_vec(matrix: &DMatrix<f64>, v: &DVector<f64>) -> MathResult<DVector<f64>> {
    if matrix.ncols() != v.len() {
        return Err(MathError::dimension_mismatch(
            (matrix.nrows(), matrix.ncols()),
            (v.len(), 1),
        ));
    }

    let mut out = DVector::zeros(matrix.nrows());
    for i in 0..matrix.nrows() {
        let mut sum = 0.0;
        for j in 0..matrix.ncols() {
            sum += matrix[(i, j)] * v[j];
        }
        out[i] = sum;
    }

    Ok(out)
}

/// Quadratic form `vᵀ M v` for a square matrix.
pub fn quadratic_form(v: &DVector<f64>, matrix: &DMatrix<f64>) -> MathResult<f64> {
    if !matrix.is_square() {
        return Err(MathError::invalid_input(format!(
            "Quadratic form requires a square matrix, got {}x{}",
            matrix.nrows(),
            matrix.ncols()
        )));
    }

    let mv = mat_vec(matrix, v)?;
    dot(v, &mv)
}

/// Returns true if `matrix` is square and `|M[i][j] - M[j][i]| <= tolerance`.
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    if !matrix.is_square() {
        return false;
    }

    let n = matrix.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| (matrix[(i, j)] - matrix[(j, i)]).abs() <= tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot() {
        let a = DVector::from_vec(vec![0.2, 0.3, 0.5]);
        let b = DVector::from_vec(vec![0.01, -0.02, 0.04]);
        assert_relative_eq!(dot(&a, &b).unwrap(), 0.016, epsilon = 1e-12);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let a = DVector::from_vec(vec![1.0, 2.0]);
        let b = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            dot(&a, &b),
            Err(MathError::DimensionMismatch { rows1: 2, rows2: 3, .. })
        ));
    }

    #[test]
    fn test_mat_vec() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = DVector::from_vec(vec![1.0, 0.0, -1.0]);
        let out = mat_vec(&m, &v).unwrap();
        assert_relative_eq!(out[0], -2.0);
        assert_relative_eq!(out[1], -2.0);

        let short = DVector::from_vec(vec![1.0, 0.0]);
        assert!(mat_vec(&m, &short).is_err());
    }

    #[test]
    fn test_quadratic_form() {
        // Two uncorrelated assets with variances 0.04 and 0.09, equal weight.
        let cov = DMatrix::from_row_slice(2, 2, &[0.04, 0.0, 0.0, 0.09]);
        let w = DVector::from_vec(vec![0.5, 0.5]);
        assert_relative_eq!(quadratic_form(&w, &cov).unwrap(), 0.0325, epsilon = 1e-12);

        let rect = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        assert!(quadratic_form(&w, &rect).is_err());
    }

    #[test]
    fn test_is_symmetric() {
        let sym = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 2.0]);
        let asym = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.4, 2.0]);
        assert!(is_symmetric(&sym, 0.0));
        assert!(!is_symmetric(&asym, 1e-6));
        assert!(!is_symmetric(&DMatrix::zeros(2, 3), 1.0));
    }
}
