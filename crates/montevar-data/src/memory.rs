//! In-memory price source.

use montevar_core::{Date, InstrumentId, PriceHistory, PriceSeries};

use crate::error::DataResult;
use crate::source::{fetch_window, latest, PriceSource, SourceType};

/// Serves prices from series held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryPriceSource {
    history: PriceHistory,
}

impl InMemoryPriceSource {
    /// Wraps an existing history.
    pub fn new(history: PriceHistory) -> Self {
        Self { history }
    }

    /// Builds a source from individual series.
    pub fn from_series(series: Vec<PriceSeries>) -> DataResult<Self> {
        Ok(Self::new(PriceHistory::new(series)?))
    }

    /// The full history.
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }
}

impl PriceSource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn instruments(&self) -> Vec<InstrumentId> {
        self.history.instruments().cloned().collect()
    }

    fn latest_date(&self, tickers: &[InstrumentId]) -> DataResult<Option<Date>> {
        latest(&self.history, tickers)
    }

    fn fetch(&self, tickers: &[InstrumentId], start: Date, end: Date) -> DataResult<PriceHistory> {
        fetch_window(&self.history, tickers, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;
    use montevar_core::{CoreError, PricePoint};

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 3, day).unwrap()
    }

    fn source() -> InMemoryPriceSource {
        let spy = PriceSeries::new(
            "SPY",
            (1..=10).map(|i| PricePoint::new(d(i), 500.0 + f64::from(i))).collect(),
        )
        .unwrap();
        let gld = PriceSeries::new(
            "GLD",
            (1..=8).map(|i| PricePoint::new(d(i), 200.0 + f64::from(i))).collect(),
        )
        .unwrap();
        InMemoryPriceSource::from_series(vec![spy, gld]).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<InstrumentId> {
        names.iter().map(|n| InstrumentId::new(n).unwrap()).collect()
    }

    #[test]
    fn test_fetch_window() {
        let history = source().fetch(&ids(&["GLD", "SPY"]), d(3), d(6)).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.series()[0].instrument().as_str(), "GLD");
        assert_eq!(history.first_date(), Some(d(3)));
        assert_eq!(history.last_date(), Some(d(6)));
        assert!(history.is_aligned());
    }

    #[test]
    fn test_latest_date() {
        let src = source();
        assert_eq!(src.latest_date(&ids(&["SPY"])).unwrap(), Some(d(10)));
        assert_eq!(src.latest_date(&ids(&["GLD"])).unwrap(), Some(d(8)));
        assert_eq!(src.source_type(), SourceType::Memory);
        assert_eq!(src.instruments().len(), 2);
    }

    #[test]
    fn test_errors() {
        let src = source();
        assert!(matches!(
            src.fetch(&ids(&["QQQ"]), d(1), d(5)),
            Err(DataError::Core(CoreError::UnknownInstrument { .. }))
        ));
        assert!(matches!(
            src.fetch(&ids(&["SPY"]), d(5), d(1)),
            Err(DataError::InvalidRange { .. })
        ));
    }
}
