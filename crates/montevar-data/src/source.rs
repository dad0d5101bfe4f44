//! The price source seam.

use montevar_core::{Date, InstrumentId, PriceHistory};

use crate::error::{DataError, DataResult};

/// Where a source gets its prices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// File-based (CSV)
    File,
    /// Held in memory
    Memory,
}

/// A provider of historical prices.
pub trait PriceSource {
    /// The kind of source.
    fn source_type(&self) -> SourceType;

    /// Instruments the source can supply.
    fn instruments(&self) -> Vec<InstrumentId>;

    /// Latest observation date across `tickers`, if any.
    ///
    /// # Errors
    ///
    /// Fails if one of the tickers is unknown to the source.
    fn latest_date(&self, tickers: &[InstrumentId]) -> DataResult<Option<Date>>;

    /// Series for `tickers`, in that order, restricted to `[start, end]`.
    ///
    /// # Errors
    ///
    /// Fails if one of the tickers is unknown or `start > end`.
    fn fetch(&self, tickers: &[InstrumentId], start: Date, end: Date)
        -> DataResult<PriceHistory>;
}

/// Shared lookup for sources that keep a full history in memory.
pub(crate) fn fetch_window(
    history: &PriceHistory,
    tickers: &[InstrumentId],
    start: Date,
    end: Date,
) -> DataResult<PriceHistory> {
    if start > end {
        return Err(DataError::InvalidRange { start, end });
    }
    let window = history.select(tickers)?.window(start, end);

    tracing::debug!(
        instruments = window.len(),
        %start,
        %end,
        "fetched price window"
    );
    Ok(window)
}

pub(crate) fn latest(history: &PriceHistory, tickers: &[InstrumentId]) -> DataResult<Option<Date>> {
    Ok(history.select(tickers)?.last_date())
}
