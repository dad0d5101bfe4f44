//! # Montevar
//!
//! Monte Carlo Value at Risk for multi-asset portfolios.
//!
//! This crate re-exports the public API of the Montevar workspace:
//!
//! - [`types`]: dates, instrument identifiers, price series and history
//! - [`math`]: dimension-checked linear algebra and sample statistics
//! - [`risk`]: return statistics, portfolio aggregation, scenario
//!   simulation and the VaR estimator
//! - [`config`]: the TOML-backed run configuration
//! - [`data`]: price sources (with the default `data` feature)
//!
//! ## Example
//!
//! ```ignore
//! use montevar::prelude::*;
//!
//! let source = CsvPriceSource::new("prices.csv")?;
//! let config = VaRConfig::default().with_seed(42);
//!
//! let end = source.latest_date(&config.tickers)?.unwrap();
//! let history = source.fetch(&config.tickers, config.start_date(end)?, end)?;
//! let report = VaRCalculator::new(config).run(&history)?;
//!
//! println!("{}", report.var);
//! ```

#![warn(missing_docs)]

pub use montevar_config as config;
pub use montevar_core as types;
pub use montevar_math as math;
pub use montevar_risk as risk;

#[cfg(feature = "data")]
pub use montevar_data as data;

/// Prelude for convenient imports
pub mod prelude {
    pub use montevar_config::{VaRConfig, Validate};
    pub use montevar_core::prelude::*;
    pub use montevar_risk::prelude::*;

    #[cfg(feature = "data")]
    pub use montevar_data::{CsvPriceSource, InMemoryPriceSource, PriceSource};
}
