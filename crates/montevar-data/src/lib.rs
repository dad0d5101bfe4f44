//! # Montevar Data
//!
//! Price history sources for the Montevar VaR engine.
//!
//! All data acquisition happens here, before the engine runs:
//! - [`PriceSource`] trait: fetch aligned-ready price series for a date range
//! - [`CsvPriceSource`]: long (`date,ticker,adj_close`) or wide
//!   (`date,SPY,BND,...`) CSV files
//! - [`InMemoryPriceSource`]: prebuilt series for tests and embedding

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod file;
mod memory;
mod source;

pub use error::{DataError, DataResult};
pub use file::{CsvLayout, CsvPriceSource};
pub use memory::InMemoryPriceSource;
pub use source::{PriceSource, SourceType};
