//! Price observations and per-instrument price series.

use serde::{Deserialize, Serialize};

use super::{Date, InstrumentId};
use crate::error::{CoreError, CoreResult};

/// A single adjusted-close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Adjusted close price (dividends and splits folded in).
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }
}

/// An ordered sequence of adjusted-close prices for one instrument.
///
/// Dates are strictly increasing (no duplicates) and every price is
/// finite and strictly positive, so log-returns are always defined
/// between two consecutive observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    instrument: InstrumentId,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    ///
    /// - `CoreError::EmptyIdentifier` for a blank instrument id
    /// - `CoreError::InvalidPrice` for a non-positive or non-finite price
    /// - `CoreError::UnorderedSeries` if dates are not strictly increasing
    pub fn new(instrument: impl AsRef<str>, points: Vec<PricePoint>) -> CoreResult<Self> {
        let instrument = InstrumentId::new(instrument)?;

        for (i, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(CoreError::InvalidPrice {
                    instrument: instrument.to_string(),
                    date: point.date.to_string(),
                    value: point.price,
                });
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(CoreError::UnorderedSeries {
                    instrument: instrument.to_string(),
                    date: point.date.to_string(),
                });
            }
        }

        Ok(Self { instrument, points })
    }

    /// Builds a series from unsorted observations, sorting them by date.
    ///
    /// Duplicate dates are still rejected.
    pub fn from_unsorted(
        instrument: impl AsRef<str>,
        mut points: Vec<PricePoint>,
    ) -> CoreResult<Self> {
        points.sort_by_key(|p| p.date);
        Self::new(instrument, points)
    }

    /// Returns the instrument identifier.
    #[must_use]
    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    /// Returns the observations in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the observation dates.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Iterates over the prices.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// First observation date, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    /// Last observation date, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Price observed on `date`, if there is one.
    #[must_use]
    pub fn price_on(&self, date: Date) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].price)
    }

    /// Returns the sub-series with dates in `[start, end]` (inclusive).
    #[must_use]
    pub fn window(&self, start: Date, end: Date) -> Self {
        Self {
            instrument: self.instrument.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 1, day).unwrap()
    }

    #[test]
    fn test_valid_series() {
        let series = PriceSeries::new(
            "spy",
            vec![
                PricePoint::new(d(2), 100.0),
                PricePoint::new(d(3), 101.0),
                PricePoint::new(d(5), 99.5),
            ],
        )
        .unwrap();

        assert_eq!(series.instrument().as_str(), "SPY");
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(d(2)));
        assert_eq!(series.last_date(), Some(d(5)));
        assert_eq!(series.price_on(d(3)), Some(101.0));
        assert_eq!(series.price_on(d(4)), None);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let result = PriceSeries::new(
            "SPY",
            vec![PricePoint::new(d(2), 100.0), PricePoint::new(d(2), 101.0)],
        );
        assert!(matches!(result, Err(CoreError::UnorderedSeries { .. })));

        let result = PriceSeries::from_unsorted(
            "SPY",
            vec![PricePoint::new(d(3), 100.0), PricePoint::new(d(3), 101.0)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unsorted_input() {
        assert!(PriceSeries::new(
            "SPY",
            vec![PricePoint::new(d(3), 100.0), PricePoint::new(d(2), 101.0)],
        )
        .is_err());

        let series = PriceSeries::from_unsorted(
            "SPY",
            vec![PricePoint::new(d(3), 100.0), PricePoint::new(d(2), 101.0)],
        )
        .unwrap();
        assert_eq!(series.prices().collect::<Vec<_>>(), vec![101.0, 100.0]);
    }

    #[test]
    fn test_invalid_prices_rejected() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = PriceSeries::new("SPY", vec![PricePoint::new(d(2), bad)]);
            assert!(matches!(result, Err(CoreError::InvalidPrice { .. })));
        }
    }

    #[test]
    fn test_window() {
        let series = PriceSeries::new(
            "SPY",
            (2..10).map(|day| PricePoint::new(d(day), f64::from(day))).collect(),
        )
        .unwrap();

        let window = series.window(d(4), d(6));
        assert_eq!(window.dates().collect::<Vec<_>>(), vec![d(4), d(5), d(6)]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn from_unsorted_orders_dates(
                offsets in prop::collection::btree_set(0i64..1_000, 1..50),
                seed in any::<u64>(),
            ) {
                let base = d(1);
                let mut points: Vec<PricePoint> = offsets
                    .iter()
                    .map(|&o| PricePoint::new(base.add_days(o), 1.0 + o as f64))
                    .collect();
                // Deterministic shuffle.
                let n = points.len();
                for i in 0..n {
                    let j = (seed.wrapping_mul(i as u64 + 1) % n as u64) as usize;
                    points.swap(i, j);
                }

                let series = PriceSeries::from_unsorted("SPY", points).unwrap();
                let dates: Vec<Date> = series.dates().collect();
                prop_assert_eq!(dates.len(), n);
                prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
            }

            #[test]
            fn window_is_subset_in_range(lo in 0i64..60, len in 0i64..60) {
                let series = PriceSeries::new(
                    "SPY",
                    (0..60).map(|o| PricePoint::new(d(1).add_days(o), 100.0)).collect(),
                )
                .unwrap();
                let start = d(1).add_days(lo);
                let end = start.add_days(len);
                let window = series.window(start, end);
                prop_assert!(window.dates().all(|x| x >= start && x <= end));
                prop_assert!(window.len() <= series.len());
            }
        }
    }
}
