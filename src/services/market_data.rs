//! Market data provider interface.
//!
//! A provider turns `(symbol, period, interval)` into an ascending sequence of
//! possibly incomplete bars. Cleaning them is the normalizer's job.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RawBar;

/// Errors raised by a `MarketDataProvider` implementation
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("no data returned for {0}")]
    NoData(String),

    /// Request parameters the provider does not accept
    #[error("invalid {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Historical bars for `symbol`, oldest first
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<RawBar>, ProviderError>;
}
