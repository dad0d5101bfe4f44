//! Scenario generation.
//!
//! A scenario is one simulated portfolio gain/loss over the horizon,
//! produced from a single standard-normal shock. Randomness is an injected
//! [`ShockSource`] so runs can be seeded or fully scripted.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::portfolio::PortfolioRiskProfile;
use crate::{RiskError, RiskResult};

/// A source of independent standard-normal draws.
pub trait ShockSource {
    /// Returns the next shock `z ~ N(0, 1)`.
    fn next_shock(&mut self) -> f64;
}

impl<S: ShockSource + ?Sized> ShockSource for &mut S {
    fn next_shock(&mut self) -> f64 {
        (**self).next_shock()
    }
}

impl<S: ShockSource + ?Sized> ShockSource for Box<S> {
    fn next_shock(&mut self) -> f64 {
        (**self).next_shock()
    }
}

/// Standard-normal shocks drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct NormalShocks<R> {
    rng: R,
}

impl<R: Rng> NormalShocks<R> {
    /// Wraps a random generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl NormalShocks<StdRng> {
    /// Deterministic shocks from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Shocks seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ShockSource for NormalShocks<R> {
    fn next_shock(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

/// Always returns the same shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantShocks(pub f64);

impl ShockSource for ConstantShocks {
    fn next_shock(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of shocks, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ReplayShocks {
    shocks: Vec<f64>,
    position: usize,
}

impl ReplayShocks {
    /// Creates a replay source.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` for an empty list.
    pub fn new(shocks: Vec<f64>) -> RiskResult<Self> {
        if shocks.is_empty() {
            return Err(RiskError::invalid_input("replay shock list is empty"));
        }
        Ok(Self {
            shocks,
            position: 0,
        })
    }
}

impl ShockSource for ReplayShocks {
    fn next_shock(&mut self) -> f64 {
        let z = self.shocks[self.position];
        self.position = (self.position + 1) % self.shocks.len();
        z
    }
}

/// Gain/loss of one scenario.
///
/// `value * std_dev * days + value * z * sqrt(days)`
///
/// The first term grows linearly with the horizon and uses the
/// single-period standard deviation, not the mean return; the stochastic
/// term follows square-root-of-time scaling.
pub fn scenario_gain_loss(portfolio_value: f64, std_dev: f64, z: f64, days: u32) -> f64 {
    let days = f64::from(days);
    portfolio_value * std_dev * days + portfolio_value * z * days.sqrt()
}

/// Maps shocks to scenario gains/losses for fixed portfolio parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioGenerator {
    portfolio_value: f64,
    std_dev: f64,
    horizon_days: u32,
}

impl ScenarioGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` for a non-finite portfolio value,
    /// a negative or non-finite standard deviation, or a zero horizon.
    pub fn new(portfolio_value: f64, std_dev: f64, horizon_days: u32) -> RiskResult<Self> {
        if !portfolio_value.is_finite() {
            return Err(RiskError::invalid_input(format!(
                "portfolio value must be finite, got {portfolio_value}"
            )));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(RiskError::invalid_input(format!(
                "standard deviation must be finite and non-negative, got {std_dev}"
            )));
        }
        if horizon_days == 0 {
            return Err(RiskError::invalid_input("horizon must be at least one day"));
        }

        Ok(Self {
            portfolio_value,
            std_dev,
            horizon_days,
        })
    }

    /// Creates a generator from an aggregated portfolio profile.
    pub fn from_profile(
        portfolio_value: f64,
        profile: &PortfolioRiskProfile,
        horizon_days: u32,
    ) -> RiskResult<Self> {
        Self::new(portfolio_value, profile.std_dev, horizon_days)
    }

    /// Nominal exposure.
    pub fn portfolio_value(&self) -> f64 {
        self.portfolio_value
    }

    /// Single-period portfolio standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Horizon in trading days.
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Outcome for a given shock.
    pub fn gain_loss(&self, z: f64) -> f64 {
        scenario_gain_loss(self.portfolio_value, self.std_dev, z, self.horizon_days)
    }

    /// Draws one shock and returns its outcome.
    pub fn draw<S: ShockSource + ?Sized>(&self, source: &mut S) -> f64 {
        self.gain_loss(source.next_shock())
    }
}
