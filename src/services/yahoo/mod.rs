//! Yahoo-style chart API provider

pub mod provider;
pub mod response;

pub use provider::{map_ticker, validate_interval, validate_period, YahooChartProvider};
