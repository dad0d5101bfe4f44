//! # montevar-risk
//!
//! Monte Carlo Value at Risk for multi-asset portfolios.
//!
//! The engine runs as one synchronous pipeline:
//!
//! - **Returns**: log-returns, mean vector and covariance from price history
//! - **Portfolio**: expected return and standard deviation for a weight vector
//! - **Scenario**: one simulated gain/loss from a standard-normal shock
//! - **Simulation**: N independent scenarios, sequential or parallel
//! - **VaR**: negated lower-tail percentile of the scenario set
//!
//! ## Example
//!
//! ```ignore
//! use montevar_config::VaRConfig;
//! use montevar_risk::prelude::*;
//!
//! let config = VaRConfig::default().with_seed(42);
//! let report = VaRCalculator::new(config).run(&history)?;
//!
//! println!("{}", report.var);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod calculator;
mod error;
pub mod portfolio;
pub mod returns;
pub mod scenario;
pub mod simulation;
pub mod var;

pub use error::{RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::{VaRCalculator, VaRReport};
    pub use crate::portfolio::{PortfolioRiskProfile, WeightVector};
    pub use crate::returns::{LogReturnMatrix, ReturnStatistics};
    pub use crate::scenario::{ConstantShocks, NormalShocks, ScenarioGenerator, ShockSource};
    pub use crate::simulation::{simulate, simulate_parallel, Histogram, ScenarioSet};
    pub use crate::var::{monte_carlo_var, VaRResult};
    pub use crate::{RiskError, RiskResult};
}
