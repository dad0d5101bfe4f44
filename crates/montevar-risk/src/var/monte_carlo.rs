//! Monte Carlo VaR from a simulated scenario set.

use montevar_math::statistics::percentile;

use super::VaRResult;
use crate::simulation::ScenarioSet;
use crate::{RiskError, RiskResult};

/// Estimates VaR as the negated `(1 - confidence)` percentile of the
/// scenario outcomes.
///
/// The percentile interpolates linearly between order statistics at rank
/// `p * (n - 1)`. The sign is flipped unconditionally, so a lower tail that
/// is still a gain yields a negative VaR.
///
/// # Arguments
///
/// * `scenarios` - Simulated gains/losses
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
///
/// # Errors
///
/// - `RiskError::EmptyScenarioSet` when there are no scenarios
/// - `RiskError::InvalidConfidenceLevel` unless `0 < confidence_level < 1`
pub fn monte_carlo_var(scenarios: &ScenarioSet, confidence_level: f64) -> RiskResult<VaRResult> {
    if scenarios.is_empty() {
        return Err(RiskError::EmptyScenarioSet);
    }

    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(RiskError::InvalidConfidenceLevel {
            level: confidence_level,
        });
    }

    let quantile = percentile(scenarios.values(), (1.0 - confidence_level) * 100.0)?;

    Ok(VaRResult {
        var: -quantile,
        quantile,
        confidence_level,
    })
}
