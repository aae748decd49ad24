//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::trend::calculate_ema;
use crate::models::{MacdPeriods, PriceBar};

/// MACD and signal line, one value per bar
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub periods: MacdPeriods,
}

/// Calculate MACD
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
pub fn calculate_macd(bars: &[PriceBar], periods: MacdPeriods) -> MacdSeries {
    let fast = calculate_ema(bars, periods.fast);
    let slow = calculate_ema(bars, periods.slow);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = math::ema_series(&macd, periods.signal);

    MacdSeries {
        macd,
        signal,
        periods,
    }
}
