//! Domain types for historical price data.
//!
//! - [`Date`]: Calendar date of an observation
//! - [`InstrumentId`]: Identifier (ticker) of a traded instrument
//! - [`PricePoint`] / [`PriceSeries`]: Ordered adjusted-close observations
//! - [`PriceHistory`]: Several series over a common instrument ordering
//! - [`AlignedPrices`]: The union date axis with per-instrument gaps

mod date;
mod history;
mod instrument;
mod price;

pub use date::Date;
pub use history::{AlignedPrices, PriceHistory};
pub use instrument::InstrumentId;
pub use price::{PricePoint, PriceSeries};
