//! Monte Carlo simulation driver.
//!
//! Builds a [`ScenarioSet`] by drawing the requested number of independent
//! scenarios, either sequentially from a caller-supplied [`ShockSource`]
//! or in parallel chunks with per-chunk random streams.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::scenario::{NormalShocks, ScenarioGenerator, ShockSource};
use crate::{RiskError, RiskResult};

/// Scenarios generated by one parallel work item.
pub const PARALLEL_CHUNK_SIZE: usize = 8192;

/// Simulated gain/loss outcomes of one run.
///
/// Order carries no meaning for the quantile estimate but is stable for
/// a given random stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    values: Vec<f64>,
}

impl ScenarioSet {
    /// Wraps precomputed outcomes.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The outcomes in generation order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the set and returns the outcomes.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no scenarios.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the outcomes.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.values.iter()
    }

    /// Worst outcome.
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().min_by(f64::total_cmp)
    }

    /// Best outcome.
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().max_by(f64::total_cmp)
    }

    /// Average outcome.
    pub fn mean(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.values.iter().sum::<f64>() / self.len() as f64)
    }

    /// Equal-width histogram with `bins` bins normalised to unit area.
    ///
    /// The last bin is closed on the right so the maximum is counted. A set
    /// whose values are all equal is binned over `[v - 0.5, v + 0.5]`.
    pub fn histogram(&self, bins: usize) -> RiskResult<Histogram> {
        if bins == 0 {
            return Err(RiskError::invalid_input("histogram needs at least one bin"));
        }
        let (Some(mut lo), Some(mut hi)) = (self.min(), self.max()) else {
            return Err(RiskError::EmptyScenarioSet);
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in &self.values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = self.len() as f64;
        let densities = counts.iter().map(|&c| c as f64 / (total * width)).collect();

        Ok(Histogram {
            edges,
            counts,
            densities,
        })
    }
}

impl From<Vec<f64>> for ScenarioSet {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

/// Binned view of a scenario distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins.
    pub edges: Vec<f64>,
    /// Scenarios per bin.
    pub counts: Vec<usize>,
    /// Probability density per bin (sums to 1 when multiplied by width).
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Width of every bin.
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Index of the bin containing `value`, if it lies within the edges.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let lo = *self.edges.first()?;
        let hi = *self.edges.last()?;
        if !(lo..=hi).contains(&value) {
            return None;
        }
        Some((((value - lo) / self.bin_width()) as usize).min(self.bins() - 1))
    }
}

fn check_count(count: usize) -> RiskResult<()> {
    if count == 0 {
        return Err(RiskError::InvalidSimulationCount { count });
    }
    Ok(())
}

/// Draws `count` scenarios sequentially from `source`.
///
/// # Errors
///
/// Returns `RiskError::InvalidSimulationCount` when `count` is zero.
pub fn simulate<S: ShockSource + ?Sized>(
    count: usize,
    generator: &ScenarioGenerator,
    source: &mut S,
) -> RiskResult<ScenarioSet> {
    check_count(count)?;

    let values: Vec<f64> = (0..count).map(|_| generator.draw(source)).collect();

    tracing::debug!(scenarios = values.len(), "simulation complete");
    Ok(ScenarioSet { values })
}

/// Draws `count` scenarios on the rayon thread pool.
///
/// Work is split into chunks of [`PARALLEL_CHUNK_SIZE`]; chunk `k` draws
/// from its own generator seeded from `(seed, k)` and writes to its own
/// buffer. Chunks are concatenated in order, so the result depends only on
/// `seed` and `count`, never on the number of threads.
///
/// # Errors
///
/// Returns `RiskError::InvalidSimulationCount` when `count` is zero.
pub fn simulate_parallel(
    count: usize,
    generator: &ScenarioGenerator,
    seed: u64,
) -> RiskResult<ScenarioSet> {
    check_count(count)?;

    let chunks = count.div_ceil(PARALLEL_CHUNK_SIZE);
    let buffers: Vec<Vec<f64>> = (0..chunks)
        .into_par_iter()
        .map(|k| {
            let len = PARALLEL_CHUNK_SIZE.min(count - k * PARALLEL_CHUNK_SIZE);
            let mut source = NormalShocks::seeded(chunk_seed(seed, k as u64));
            (0..len).map(|_| generator.draw(&mut source)).collect::<Vec<f64>>()
        })
        .collect();

    let values = buffers.concat();

    tracing::debug!(scenarios = values.len(), chunks, "parallel simulation complete");
    Ok(ScenarioSet { values })
}

/// SplitMix64 finaliser over the base seed and chunk index.
fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut z = seed.wrapping_add(chunk.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
