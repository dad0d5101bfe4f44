//! CLI command implementations.

pub mod config;
pub mod run;
pub mod stats;

pub use config::ConfigArgs;
pub use run::RunArgs;
pub use stats::StatsArgs;

use montevar_core::{Date, InstrumentId};
use montevar_data::PriceSource;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s.trim()).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses ticker arguments into identifiers.
pub fn parse_tickers(tickers: &[String]) -> anyhow::Result<Vec<InstrumentId>> {
    Ok(tickers
        .iter()
        .map(InstrumentId::new)
        .collect::<Result<Vec<_>, _>>()?)
}

/// End of the history window: the requested date or the latest price.
pub fn resolve_end_date(
    source: &dyn PriceSource,
    tickers: &[InstrumentId],
    requested: Option<Date>,
) -> anyhow::Result<Date> {
    if let Some(end) = requested {
        return Ok(end);
    }
    let names: Vec<&str> = tickers.iter().map(InstrumentId::as_str).collect();
    Ok(source
        .latest_date(tickers)?
        .ok_or_else(|| CliError::NoPrices(names.join(", ")))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
        assert!(matches!(parse_date("02/29/2024"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_tickers() {
        let ids = parse_tickers(&["spy".to_string(), " bnd".to_string()]).unwrap();
        assert_eq!(ids[0].as_str(), "SPY");
        assert_eq!(ids[1].as_str(), "BND");
        assert!(parse_tickers(&[" ".to_string()]).is_err());
    }
}
