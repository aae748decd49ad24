use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::models::RawBar;
use crate::services::market_data::{MarketDataProvider, ProviderError};
use crate::services::yahoo::response::{ChartResponse, ChartResult};

pub const VALID_PERIODS: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];
pub const VALID_INTERVALS: &[&str] = &[
    "1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "1d", "5d", "1wk", "1mo", "3mo",
];

const NOT_FOUND_CODE: &str = "Not Found";

/// Exchange ticker for a listed symbol: index aliases, otherwise the NSE suffix
pub fn map_ticker(symbol: &str) -> String {
    match symbol {
        "NIFTY" => "^NSEI".to_string(),
        "BANKNIFTY" => "^NSEBANK".to_string(),
        s if s.ends_with(".NS") || s.ends_with(".BO") || s.starts_with('^') => s.to_string(),
        s => format!("{s}.NS"),
    }
}

pub fn validate_period(period: &str) -> Result<(), ProviderError> {
    if VALID_PERIODS.contains(&period) {
        Ok(())
    } else {
        Err(ProviderError::InvalidParameter {
            name: "period",
            value: period.to_string(),
        })
    }
}

pub fn validate_interval(interval: &str) -> Result<(), ProviderError> {
    if VALID_INTERVALS.contains(&interval) {
        Ok(())
    } else {
        Err(ProviderError::InvalidParameter {
            name: "interval",
            value: interval.to_string(),
        })
    }
}

pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().user_agent("Mozilla/5.0").build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<RawBar>, ProviderError> {
        validate_period(period)?;
        validate_interval(interval)?;

        let ticker = map_ticker(symbol);
        debug!(symbol = %symbol, ticker = %ticker, period = %period, interval = %interval, "Fetching chart");

        let response = self
            .client
            .get(self.chart_url(&ticker))
            .query(&[("range", period), ("interval", interval)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::SymbolNotFound(symbol.to_string()));
        }
        if !status.is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(format!("{status}: {error_msg}")));
        }

        let chart = response.json::<ChartResponse>().await?.chart;
        if let Some(err) = chart.error {
            return Err(if err.code == NOT_FOUND_CODE {
                ProviderError::SymbolNotFound(symbol.to_string())
            } else {
                ProviderError::Api(err.description.unwrap_or(err.code))
            });
        }

        let result = chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;

        let bars = into_raw_bars(result);
        if bars.is_empty() {
            return Err(ProviderError::NoData(symbol.to_string()));
        }
        Ok(bars)
    }
}

fn into_raw_bars(result: ChartResult) -> Vec<RawBar> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &secs)| {
            let timestamp: DateTime<Utc> = DateTime::from_timestamp(secs, 0)?;
            Some(RawBar::new(
                at(&quote.open, i),
                at(&quote.high, i),
                at(&quote.low, i),
                at(&quote.close, i),
                at(&quote.volume, i),
                timestamp,
            ))
        })
        .collect()
}
