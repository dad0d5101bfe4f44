//! Multi-instrument price history and date alignment.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::{Date, InstrumentId, PriceSeries};
use crate::error::{CoreError, CoreResult};

/// Price series for a fixed, ordered set of instruments.
///
/// The instrument order is significant: it defines the column order of
/// every derived matrix and must match the order of a weight vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    series: Vec<PriceSeries>,
}

impl PriceHistory {
    /// Creates a history from per-instrument series.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateInstrument` if an instrument appears twice.
    pub fn new(series: Vec<PriceSeries>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(series.len());
        for s in &series {
            if !seen.insert(s.instrument().clone()) {
                return Err(CoreError::DuplicateInstrument {
                    instrument: s.instrument().to_string(),
                });
            }
        }
        Ok(Self { series })
    }

    /// Returns the series in instrument order.
    #[must_use]
    pub fn series(&self) -> &[PriceSeries] {
        &self.series
    }

    /// Returns the instruments in order.
    pub fn instruments(&self) -> impl Iterator<Item = &InstrumentId> + '_ {
        self.series.iter().map(PriceSeries::instrument)
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if there are no instruments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Looks up the series of one instrument.
    #[must_use]
    pub fn get(&self, instrument: &InstrumentId) -> Option<&PriceSeries> {
        self.series.iter().find(|s| s.instrument() == instrument)
    }

    /// Returns a history restricted to `instruments`, in that order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownInstrument` if one of them has no series.
    pub fn select(&self, instruments: &[InstrumentId]) -> CoreResult<Self> {
        let series = instruments
            .iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| CoreError::unknown_instrument(id.as_str()))
            })
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(series)
    }

    /// Restricts every series to dates in `[start, end]`.
    #[must_use]
    pub fn window(&self, start: Date, end: Date) -> Self {
        Self {
            series: self.series.iter().map(|s| s.window(start, end)).collect(),
        }
    }

    /// Earliest observation date across all series.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.series.iter().filter_map(PriceSeries::first_date).min()
    }

    /// Latest observation date across all series.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.series.iter().filter_map(PriceSeries::last_date).max()
    }

    /// Returns true if every series has exactly the same dates.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        match self.series.split_first() {
            None => true,
            Some((first, rest)) => rest.iter().all(|s| s.dates().eq(first.dates())),
        }
    }

    /// Aligns all series on the union of their dates.
    ///
    /// Cells for which an instrument has no observation are `None`.
    #[must_use]
    pub fn align(&self) -> AlignedPrices {
        let dates: Vec<Date> = self
            .series
            .iter()
            .flat_map(PriceSeries::dates)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows: Vec<Vec<Option<f64>>> = dates
            .iter()
            .map(|&date| self.series.iter().map(|s| s.price_on(date)).collect())
            .collect();

        let aligned = AlignedPrices {
            instruments: self.instruments().cloned().collect(),
            dates,
            rows,
        };

        tracing::debug!(
            instruments = aligned.instruments.len(),
            dates = aligned.dates.len(),
            missing = aligned.missing_count(),
            "aligned price history"
        );

        aligned
    }
}

/// Prices of several instruments laid out on one date axis.
///
/// Row `t` holds the prices observed on `dates[t]`, one cell per
/// instrument in `instruments` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPrices {
    instruments: Vec<InstrumentId>,
    dates: Vec<Date>,
    rows: Vec<Vec<Option<f64>>>,
}

impl AlignedPrices {
    /// Instrument (column) order.
    #[must_use]
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Date (row) axis.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    /// Number of dates.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of instruments.
    #[must_use]
    pub fn n_instruments(&self) -> usize {
        self.instruments.len()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_none()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 1, day).unwrap()
    }

    fn series(id: &str, obs: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::new(
            id,
            obs.iter().map(|&(day, p)| PricePoint::new(d(day), p)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_instrument() {
        let a = series("SPY", &[(2, 1.0)]);
        let b = series("spy", &[(3, 1.0)]);
        assert!(matches!(
            PriceHistory::new(vec![a, b]),
            Err(CoreError::DuplicateInstrument { .. })
        ));
    }

    #[test]
    fn test_aligned_history() {
        let history = PriceHistory::new(vec![
            series("SPY", &[(2, 100.0), (3, 101.0)]),
            series("BND", &[(2, 70.0), (3, 70.5)]),
        ])
        .unwrap();

        assert!(history.is_aligned());
        let aligned = history.align();
        assert_eq!(aligned.n_rows(), 2);
        assert_eq!(aligned.n_instruments(), 2);
        assert_eq!(aligned.missing_count(), 0);
        assert_eq!(aligned.rows()[1], vec![Some(101.0), Some(70.5)]);
    }

    #[test]
    fn test_misaligned_history() {
        let history = PriceHistory::new(vec![
            series("SPY", &[(2, 100.0), (3, 101.0), (4, 102.0)]),
            series("BND", &[(2, 70.0), (4, 70.5)]),
        ])
        .unwrap();

        assert!(!history.is_aligned());
        let aligned = history.align();
        assert_eq!(aligned.dates(), &[d(2), d(3), d(4)]);
        assert_eq!(aligned.rows()[1], vec![Some(101.0), None]);
        assert_eq!(aligned.missing_count(), 1);
    }

    #[test]
    fn test_select_and_window() {
        let history = PriceHistory::new(vec![
            series("SPY", &[(2, 100.0), (3, 101.0), (4, 102.0)]),
            series("BND", &[(2, 70.0), (3, 70.2), (4, 70.5)]),
        ])
        .unwrap();

        let bnd = InstrumentId::new("BND").unwrap();
        let spy = InstrumentId::new("SPY").unwrap();
        let selected = history.select(&[bnd.clone(), spy]).unwrap();
        assert_eq!(selected.instruments().next(), Some(&bnd));

        let missing = InstrumentId::new("GLD").unwrap();
        assert!(matches!(
            history.select(&[missing]),
            Err(CoreError::UnknownInstrument { .. })
        ));

        let window = history.window(d(3), d(4));
        assert_eq!(window.first_date(), Some(d(3)));
        assert_eq!(window.last_date(), Some(d(4)));
    }
}
