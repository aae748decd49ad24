//! External market data collaborators

pub mod market_data;
pub mod yahoo;

pub use market_data::{MarketDataProvider, ProviderError};
pub use yahoo::YahooChartProvider;
