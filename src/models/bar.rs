use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cleaned OHLCV bar. Every price and volume field is finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A bar as delivered by a market data provider; any field may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawBar {
    /// Build a raw bar; non-finite inputs are recorded as missing.
    pub fn new(
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
        volume: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open: finite(open),
            high: finite(high),
            low: finite(low),
            close: finite(close),
            volume: finite(volume),
        }
    }

    pub fn complete(open: f64, high: f64, low: f64, close: f64, volume: f64, timestamp: DateTime<Utc>) -> Self {
        Self::new(Some(open), Some(high), Some(low), Some(close), Some(volume), timestamp)
    }
}

impl From<PriceBar> for RawBar {
    fn from(bar: PriceBar) -> Self {
        Self::complete(bar.open, bar.high, bar.low, bar.close, bar.volume, bar.timestamp)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
