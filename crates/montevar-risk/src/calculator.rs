//! End-to-end VaR calculator.
//!
//! This module provides a high-level `VaRCalculator` that runs the full
//! pipeline for one configuration: price history to return statistics,
//! portfolio profile, simulated scenarios and the VaR estimate.
//!
//! # Example
//!
//! ```ignore
//! use montevar_config::VaRConfig;
//! use montevar_risk::calculator::VaRCalculator;
//!
//! let config = VaRConfig::default()
//!     .with_portfolio_value(1_000_000.0)
//!     .with_seed(7);
//!
//! let report = VaRCalculator::new(config).run(&history)?;
//!
//! println!("Portfolio std dev: {}", report.profile.std_dev);
//! println!("{}", report.var);
//! ```

use serde::{Deserialize, Serialize};

use montevar_config::VaRConfig;
use montevar_core::{Date, InstrumentId, PriceHistory};

use crate::portfolio::{PortfolioRiskProfile, WeightVector};
use crate::returns::{LogReturnMatrix, ReturnStatistics, MIN_RETURN_ROWS};
use crate::scenario::{NormalShocks, ScenarioGenerator, ShockSource};
use crate::simulation::{simulate, simulate_parallel, Histogram, ScenarioSet};
use crate::var::{monte_carlo_var, VaRResult};
use crate::{RiskError, RiskResult};

/// Everything produced by one VaR run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaRReport {
    /// Instruments in weight order.
    pub instruments: Vec<InstrumentId>,
    /// Weights applied to the instruments.
    pub weights: WeightVector,
    /// First date of the history window.
    pub start_date: Date,
    /// Last date of the history window.
    pub end_date: Date,
    /// Return rows used for the statistics.
    pub observations: usize,
    /// Return rows dropped because of missing prices.
    pub dropped_rows: usize,
    /// Aggregated portfolio return and volatility.
    pub profile: PortfolioRiskProfile,
    /// Nominal exposure.
    pub portfolio_value: f64,
    /// Scenario horizon in trading days.
    pub horizon_days: u32,
    /// Seed of the random stream, if known.
    pub seed: Option<u64>,
    /// Simulated outcomes.
    pub scenarios: ScenarioSet,
    /// VaR estimate.
    pub var: VaRResult,
}

impl VaRReport {
    /// Number of simulated scenarios.
    pub fn simulation_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Density histogram of the scenarios.
    pub fn histogram(&self, bins: usize) -> RiskResult<Histogram> {
        self.scenarios.histogram(bins)
    }
}

impl std::fmt::Display for VaRReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}d): {:.6} on {:.2} over {} scenarios",
            self.var.confidence_level * 100.0,
            self.horizon_days,
            self.var.var,
            self.portfolio_value,
            self.scenarios.len()
        )
    }
}

/// Statistics and scenario parameters shared by every run mode.
struct Prepared {
    instruments: Vec<InstrumentId>,
    weights: WeightVector,
    start_date: Date,
    end_date: Date,
    observations: usize,
    dropped_rows: usize,
    profile: PortfolioRiskProfile,
    generator: ScenarioGenerator,
}

/// Calculator for Monte Carlo VaR.
///
/// Holds a configuration and applies it to any price history. The
/// configuration is taken as is: each pipeline stage enforces its own
/// preconditions, so an invalid setting surfaces as the matching
/// [`RiskError`].
#[derive(Debug, Clone)]
pub struct VaRCalculator {
    config: VaRConfig,
}

impl VaRCalculator {
    /// Creates a calculator for `config`.
    pub fn new(config: VaRConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &VaRConfig {
        &self.config
    }

    /// Runs the pipeline with normally distributed shocks.
    ///
    /// Uses the configured seed, or a fresh random seed that is recorded
    /// in the report. With `parallel` set, scenarios are drawn by
    /// [`simulate_parallel`].
    pub fn run(&self, history: &PriceHistory) -> RiskResult<VaRReport> {
        let prepared = self.prepare(history)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        let scenarios = if self.config.parallel {
            simulate_parallel(self.config.simulation_count, &prepared.generator, seed)?
        } else {
            simulate(
                self.config.simulation_count,
                &prepared.generator,
                &mut NormalShocks::seeded(seed),
            )?
        };

        self.finish(prepared, Some(seed), scenarios)
    }

    /// Runs the pipeline with caller-supplied shocks.
    ///
    /// Always sequential; the `seed` and `parallel` settings are ignored.
    pub fn run_with_source<S: ShockSource + ?Sized>(
        &self,
        history: &PriceHistory,
        source: &mut S,
    ) -> RiskResult<VaRReport> {
        let prepared = self.prepare(history)?;
        let scenarios = simulate(self.config.simulation_count, &prepared.generator, source)?;
        self.finish(prepared, None, scenarios)
    }

    fn prepare(&self, history: &PriceHistory) -> RiskResult<Prepared> {
        let selected = history.select(&self.config.tickers)?;

        let end_date = self
            .config
            .end_date
            .or_else(|| selected.last_date())
            .ok_or(RiskError::InsufficientData {
                required: MIN_RETURN_ROWS,
                actual: 0,
            })?;
        let start_date = self.config.start_date(end_date)?;

        let returns = LogReturnMatrix::from_history(&selected.window(start_date, end_date))?;
        let stats = ReturnStatistics::from_returns(&returns)?;

        let weights = WeightVector::new(self.config.resolved_weights());
        let profile = PortfolioRiskProfile::from_statistics(&stats, &weights)?;
        let generator = ScenarioGenerator::from_profile(
            self.config.portfolio_value,
            &profile,
            self.config.horizon_days,
        )?;

        tracing::info!(
            instruments = stats.n_instruments(),
            observations = stats.observations(),
            %start_date,
            %end_date,
            expected_return = profile.expected_return,
            std_dev = profile.std_dev,
            "portfolio profile computed"
        );

        Ok(Prepared {
            instruments: stats.instruments().to_vec(),
            weights,
            start_date,
            end_date,
            observations: stats.observations(),
            dropped_rows: returns.dropped_rows(),
            profile,
            generator,
        })
    }

    fn finish(
        &self,
        prepared: Prepared,
        seed: Option<u64>,
        scenarios: ScenarioSet,
    ) -> RiskResult<VaRReport> {
        let var = monte_carlo_var(&scenarios, self.config.confidence_level)?;

        tracing::info!(
            scenarios = scenarios.len(),
            confidence = var.confidence_level,
            var = var.var,
            "VaR estimated"
        );

        Ok(VaRReport {
            instruments: prepared.instruments,
            weights: prepared.weights,
            start_date: prepared.start_date,
            end_date: prepared.end_date,
            observations: prepared.observations,
            dropped_rows: prepared.dropped_rows,
            profile: prepared.profile,
            portfolio_value: self.config.portfolio_value,
            horizon_days: self.config.horizon_days,
            seed,
            scenarios,
            var,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ConstantShocks;
    use approx::assert_relative_eq;
    use montevar_core::{CoreError, PricePoint, PriceSeries};

    fn history() -> PriceHistory {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let a = [100.0, 101.0, 100.5, 102.0, 101.0, 103.0, 102.5, 104.0];
        let b = [50.0, 49.8, 50.3, 50.1, 50.6, 50.2, 50.9, 51.0];

        let make = |id: &str, prices: &[f64]| {
            let points = prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PricePoint::new(start.add_days(i as i64), p))
                .collect();
            PriceSeries::new(id, points).unwrap()
        };

        PriceHistory::new(vec![make("AAA", &a), make("BBB", &b)]).unwrap()
    }

    fn config() -> VaRConfig {
        VaRConfig::default()
            .with_tickers(["AAA", "BBB"])
            .unwrap()
            .with_simulation_count(2_000)
            .with_seed(11)
    }

    #[test]
    fn test_run_seeded() {
        let calc = VaRCalculator::new(config());
        let a = calc.run(&history()).unwrap();
        let b = calc.run(&history()).unwrap();

        assert_eq!(a.simulation_count(), 2_000);
        assert_eq!(a.observations, 7);
        assert_eq!(a.dropped_rows, 0);
        assert_eq!(a.seed, Some(11));
        assert_eq!(a.scenarios, b.scenarios);
        assert_eq!(a.var, b.var);
        assert!(a.profile.std_dev > 0.0);
    }

    #[test]
    fn test_unseeded_records_seed() {
        let mut cfg = config();
        cfg.seed = None;
        let report = VaRCalculator::new(cfg).run(&history()).unwrap();
        assert!(report.seed.is_some());
    }

    #[test]
    fn test_parallel_matches_count() {
        let report = VaRCalculator::new(config().with_parallel(true))
            .run(&history())
            .unwrap();
        assert_eq!(report.simulation_count(), 2_000);
    }

    #[test]
    fn test_constant_source() {
        let calc = VaRCalculator::new(config().with_simulation_count(10).with_horizon_days(4));
        let report = calc
            .run_with_source(&history(), &mut ConstantShocks(0.0))
            .unwrap();

        let drift = report.profile.std_dev * 4.0;
        assert!(report.scenarios.iter().all(|&v| (v - drift).abs() < 1e-15));
        assert_relative_eq!(report.var.var, -drift, epsilon = 1e-15);
        assert_eq!(report.seed, None);
    }

    #[test]
    fn test_end_date_window() {
        let end = Date::from_ymd(2024, 1, 5).unwrap();
        let calc = VaRCalculator::new(config().with_end_date(end).with_lookback_days(3));
        let report = calc.run(&history()).unwrap();

        assert_eq!(report.end_date, end);
        assert_eq!(report.start_date, Date::from_ymd(2024, 1, 2).unwrap());
        // Prices on Jan 2..=5 give three returns.
        assert_eq!(report.observations, 3);
    }

    #[test]
    fn test_errors_surface() {
        let h = history();

        let unknown = config().with_tickers(["AAA", "ZZZ"]).unwrap();
        assert!(matches!(
            VaRCalculator::new(unknown).run(&h),
            Err(RiskError::Data(CoreError::UnknownInstrument { .. }))
        ));

        let weights = config().with_weights(vec![0.7, 0.7]);
        assert!(matches!(
            VaRCalculator::new(weights).run(&h),
            Err(RiskError::InvalidWeight(_))
        ));

        let short = config().with_weights(vec![1.0]);
        assert!(matches!(
            VaRCalculator::new(short).run(&h),
            Err(RiskError::DimensionMismatch { .. })
        ));

        let zero = config().with_simulation_count(0);
        assert!(matches!(
            VaRCalculator::new(zero).run(&h),
            Err(RiskError::InvalidSimulationCount { count: 0 })
        ));

        let level = config().with_confidence_level(1.0);
        assert!(matches!(
            VaRCalculator::new(level).run(&h),
            Err(RiskError::InvalidConfidenceLevel { .. })
        ));

        let unbounded = config().with_lookback_days(u32::MAX);
        assert!(matches!(
            VaRCalculator::new(unbounded).run(&h),
            Err(RiskError::Data(CoreError::InvalidDate { .. }))
        ));

        let narrow = config().with_lookback_days(1);
        assert!(matches!(
            VaRCalculator::new(narrow).run(&h),
            Err(RiskError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_report_display() {
        let report = VaRCalculator::new(config()).run(&history()).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("VaR(95%, 5d)"));
        assert!(text.contains("2000 scenarios"));
    }
}
