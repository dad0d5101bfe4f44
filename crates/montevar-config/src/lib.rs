//! Montevar Configuration Layer
//!
//! This crate provides the run configuration for a Monte Carlo Value at
//! Risk estimate: which instruments, how much history, how the portfolio
//! is weighted, and how the simulation is parameterised.
//!
//! Configuration is an explicit value handed to the engine; nothing is
//! read from ambient or global state.
//!
//! # Example
//!
//! ```rust
//! use montevar_config::{VaRConfig, Validate};
//!
//! let config = VaRConfig::default()
//!     .with_tickers(["SPY", "BND"])
//!     .unwrap()
//!     .with_simulation_count(5_000)
//!     .with_confidence_level(0.99);
//!
//! assert!(config.is_valid());
//! assert_eq!(config.resolved_weights(), vec![0.5, 0.5]);
//! ```
//!
//! # File Format
//!
//! ```toml
//! tickers = ["SPY", "BND", "GLD", "QQQ", "VTI"]
//! lookback_days = 5475
//! portfolio_value = 1.0
//! simulation_count = 1000
//! horizon_days = 5
//! confidence_level = 0.95
//! seed = 42
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod var;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use var::{VaRConfig, MAX_LOOKBACK_DAYS, WEIGHT_SUM_TOLERANCE};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::var::VaRConfig;
}
