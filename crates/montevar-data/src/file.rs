//! CSV price files.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use montevar_core::{Date, InstrumentId, PriceHistory, PricePoint, PriceSeries};

use crate::error::{DataError, DataResult};
use crate::source::{fetch_window, latest, PriceSource, SourceType};

// =============================================================================
// LAYOUT DETECTION
// =============================================================================

/// Column layout of a price file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// One observation per row: `date,ticker,adj_close`.
    Long,
    /// One date per row, one column per ticker: `date,SPY,BND,...`.
    Wide,
}

const TICKER_HEADERS: [&str; 3] = ["ticker", "symbol", "instrument"];

impl CsvLayout {
    /// Infers the layout from a header row.
    ///
    /// A header that names a ticker column is long; anything else whose
    /// first column is the date is wide.
    pub fn detect(headers: &csv::StringRecord) -> DataResult<Self> {
        let first = headers.get(0).map(|h| h.trim().to_ascii_lowercase());
        if first.as_deref() != Some("date") {
            return Err(DataError::InvalidHeader(format!(
                "first column must be 'date', got {:?}",
                headers.get(0).unwrap_or_default()
            )));
        }

        let is_long = headers
            .iter()
            .any(|h| TICKER_HEADERS.contains(&h.trim().to_ascii_lowercase().as_str()));
        if is_long {
            return Ok(Self::Long);
        }

        if headers.len() < 2 {
            return Err(DataError::InvalidHeader(
                "wide layout needs at least one ticker column".into(),
            ));
        }
        Ok(Self::Wide)
    }
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for the long layout.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(alias = "Date")]
    date: Date,
    #[serde(alias = "Ticker", alias = "symbol", alias = "Symbol", alias = "instrument")]
    ticker: String,
    #[serde(alias = "Adj Close", alias = "adj close", alias = "close", alias = "Close")]
    adj_close: f64,
}

/// Price history loaded from a CSV file.
///
/// Prices are read once on construction; [`CsvPriceSource::reload`] picks
/// up changes to the file.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    file_path: Option<PathBuf>,
    layout: CsvLayout,
    history: PriceHistory,
}

impl CsvPriceSource {
    /// Loads prices from a CSV file.
    pub fn new(file_path: impl AsRef<Path>) -> DataResult<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let (layout, history) = load(csv::Reader::from_path(&file_path)?)?;

        tracing::info!(
            path = %file_path.display(),
            ?layout,
            instruments = history.len(),
            "loaded price file"
        );

        Ok(Self {
            file_path: Some(file_path),
            layout,
            history,
        })
    }

    /// Loads prices from any reader, e.g. an in-memory string.
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Self> {
        let (layout, history) = load(csv::Reader::from_reader(reader))?;
        Ok(Self {
            file_path: None,
            layout,
            history,
        })
    }

    /// Reloads prices from the file, if the source was built from one.
    pub fn reload(&mut self) -> DataResult<()> {
        if let Some(path) = &self.file_path {
            let (layout, history) = load(csv::Reader::from_path(path)?)?;
            self.layout = layout;
            self.history = history;
        }
        Ok(())
    }

    /// Layout detected from the header.
    pub fn layout(&self) -> CsvLayout {
        self.layout
    }

    /// Everything in the file.
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }
}

impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
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

// =============================================================================
// PARSING
// =============================================================================

type Observations = BTreeMap<InstrumentId, Vec<PricePoint>>;

fn load<R: Read>(mut reader: csv::Reader<R>) -> DataResult<(CsvLayout, PriceHistory)> {
    let headers = reader.headers()?.clone();
    let layout = CsvLayout::detect(&headers)?;

    let observations = match layout {
        CsvLayout::Long => read_long(&mut reader)?,
        CsvLayout::Wide => read_wide(&mut reader, &headers)?,
    };

    let series = observations
        .into_iter()
        .map(|(id, points)| PriceSeries::from_unsorted(id.as_str(), points))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((layout, PriceHistory::new(series)?))
}

fn read_long<R: Read>(reader: &mut csv::Reader<R>) -> DataResult<Observations> {
    let mut observations = Observations::new();

    for result in reader.deserialize() {
        let record: PriceRecord = result?;
        let id = InstrumentId::new(&record.ticker)?;
        observations
            .entry(id)
            .or_default()
            .push(PricePoint::new(record.date, record.adj_close));
    }

    Ok(observations)
}

fn read_wide<R: Read>(
    reader: &mut csv::Reader<R>,
    headers: &csv::StringRecord,
) -> DataResult<Observations> {
    let tickers = headers
        .iter()
        .skip(1)
        .map(InstrumentId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let mut observations: Observations =
        tickers.iter().map(|id| (id.clone(), Vec::new())).collect();
    let mut missing = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        let date_cell = record.get(0).unwrap_or_default();
        let date = Date::parse(date_cell.trim())
            .map_err(|e| DataError::parse(line, e.to_string()))?;

        for (id, cell) in tickers.iter().zip(record.iter().skip(1)) {
            let cell = cell.trim();
            if is_missing(cell) {
                missing += 1;
                continue;
            }
            let price: f64 = cell
                .parse()
                .map_err(|_| DataError::parse(line, format!("invalid price {cell:?} for {id}")))?;
            if let Some(points) = observations.get_mut(id) {
                points.push(PricePoint::new(date, price));
            }
        }
    }

    if missing > 0 {
        tracing::debug!(missing, "skipped empty price cells");
    }

    Ok(observations)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("null")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn id(s: &str) -> InstrumentId {
        InstrumentId::new(s).unwrap()
    }

    #[test]
    fn test_long_layout() {
        let csv = "date,ticker,adj_close\n\
                   2024-01-03,spy,471.0\n\
                   2024-01-02,SPY,470.0\n\
                   2024-01-02,BND,72.1\n\
                   2024-01-03,BND,72.3\n";
        let src = CsvPriceSource::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(src.layout(), CsvLayout::Long);
        let spy = src.history().get(&id("SPY")).unwrap();
        assert_eq!(spy.prices().collect::<Vec<_>>(), vec![470.0, 471.0]);
        assert_eq!(src.instruments(), vec![id("BND"), id("SPY")]);
    }

    #[test]
    fn test_long_layout_aliases() {
        let csv = "Date,Symbol,Adj Close\n2024-01-02,GLD,190.5\n";
        let src = CsvPriceSource::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(src.history().get(&id("GLD")).unwrap().len(), 1);
    }

    #[test]
    fn test_wide_layout_with_gaps() {
        let csv = "Date,SPY,BND\n\
                   2024-01-02,470.0,72.1\n\
                   2024-01-03,471.0,\n\
                   2024-01-04,469.5,NaN\n\
                   2024-01-05,472.0,72.4\n";
        let src = CsvPriceSource::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(src.layout(), CsvLayout::Wide);
        assert_eq!(src.history().get(&id("SPY")).unwrap().len(), 4);
        assert_eq!(src.history().get(&id("BND")).unwrap().len(), 2);
        assert!(!src.history().is_aligned());
    }

    #[test]
    fn test_fetch_range() {
        let csv = "date,SPY\n2024-01-02,1\n2024-01-03,2\n2024-01-04,3\n";
        let src = CsvPriceSource::from_reader(csv.as_bytes()).unwrap();

        let window = src.fetch(&[id("SPY")], d("2024-01-03"), d("2024-01-10")).unwrap();
        assert_eq!(window.series()[0].len(), 2);
        assert_eq!(src.latest_date(&[id("SPY")]).unwrap(), Some(d("2024-01-04")));
        assert_eq!(src.source_type(), SourceType::File);
    }

    #[test]
    fn test_bad_header() {
        let result = CsvPriceSource::from_reader("when,SPY\n2024-01-02,1\n".as_bytes());
        assert!(matches!(result, Err(DataError::InvalidHeader(_))));

        let result = CsvPriceSource::from_reader("date\n2024-01-02\n".as_bytes());
        assert!(matches!(result, Err(DataError::InvalidHeader(_))));
    }

    #[test]
    fn test_bad_cells() {
        let result = CsvPriceSource::from_reader("date,SPY\n2024-01-02,abc\n".as_bytes());
        assert!(matches!(result, Err(DataError::Parse { line: 2, .. })));

        let result = CsvPriceSource::from_reader("date,SPY\n2024-13-02,1\n".as_bytes());
        assert!(matches!(result, Err(DataError::Parse { .. })));

        let result = CsvPriceSource::from_reader("date,SPY\n2024-01-02,-1\n".as_bytes());
        assert!(matches!(result, Err(DataError::Core(_))));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let csv = "date,ticker,adj_close\n2024-01-02,SPY,1\n2024-01-02,SPY,2\n";
        assert!(matches!(
            CsvPriceSource::from_reader(csv.as_bytes()),
            Err(DataError::Core(_))
        ));
    }
}
