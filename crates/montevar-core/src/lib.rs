//! # Montevar Core
//!
//! Core types for the Montevar Monte Carlo Value at Risk library.
//!
//! This crate provides the foundational building blocks used throughout Montevar:
//!
//! - **Types**: `Date`, `InstrumentId`, `PricePoint`, `PriceSeries`
//! - **Price History**: A set of per-instrument series aligned on a common
//!   date axis, ready for return calculations
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing identifiers and raw strings
//! - **Read-Only Inputs**: Price data is validated once on construction and
//!   never mutated afterwards
//!
//! ## Example
//!
//! ```rust
//! use montevar_core::prelude::*;
//!
//! let d0 = Date::from_ymd(2024, 1, 2).unwrap();
//! let series = PriceSeries::new(
//!     "SPY",
//!     vec![
//!         PricePoint::new(d0, 470.0),
//!         PricePoint::new(d0.add_days(1), 472.5),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(series.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{AlignedPrices, Date, InstrumentId, PriceHistory, PricePoint, PriceSeries};
}

pub use error::{CoreError, CoreResult};
pub use types::{AlignedPrices, Date, InstrumentId, PriceHistory, PricePoint, PriceSeries};
