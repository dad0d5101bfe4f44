//! # Montevar Math
//!
//! Mathematical utilities for the Montevar Value at Risk library.
//!
//! This crate provides:
//!
//! - **Linear Algebra**: Dimension-checked dot products, matrix-vector
//!   products and quadratic forms
//! - **Statistics**: Column means, sample covariance, and linearly
//!   interpolated percentiles
//!
//! ## Design Philosophy
//!
//! - **Explicit Dimensions**: Every routine checks operand shapes and
//!   reports a [`MathError::DimensionMismatch`] instead of panicking
//! - **Numerical Stability**: Two-pass moments, symmetric results by
//!   construction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod linear_algebra;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{dot, is_symmetric, mat_vec, quadratic_form};
    pub use crate::statistics::{column_means, mean, percentile, sample_covariance};
}

pub use error::{MathError, MathResult};
