use serde::{Deserialize, Serialize};

/// Indicator values for a single bar. `None` marks a bar inside the
/// warm-up window of that indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub atr: Option<f64>,
    pub rsi: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub macd: Option<f64>,
    pub signal_line: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

/// EMA spans used for the MACD line and its signal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdPeriods {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdPeriods {
    pub const HIGH_VOLATILITY: MacdPeriods = MacdPeriods::new(8, 17, 6);
    pub const NORMAL: MacdPeriods = MacdPeriods::new(12, 26, 9);
    pub const LOW_VOLATILITY: MacdPeriods = MacdPeriods::new(16, 35, 12);

    pub const fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }
}

impl Default for MacdPeriods {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// Midpoint of the highest-volume price bin; `None` for a flat range
    pub poc_price: Option<f64>,
}

/// Everything the indicator engine derives from one bar sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    /// One entry per input bar, same order
    pub sets: Vec<IndicatorSet>,
    pub volume_profile: VolumeProfile,
    /// Last ATR as a percentage of the last close
    pub volatility_ratio: Option<f64>,
    pub macd_periods: MacdPeriods,
    pub band_multiplier: f64,
}

impl IndicatorFrame {
    pub fn latest(&self) -> Option<&IndicatorSet> {
        self.sets.last()
    }

    pub fn previous(&self) -> Option<&IndicatorSet> {
        self.sets.len().checked_sub(2).and_then(|i| self.sets.get(i))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
