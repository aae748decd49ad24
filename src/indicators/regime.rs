//! Volatility regime selection for the adaptive indicators.
//!
//! The regime is read from the volatility ratio: the last ATR as a percentage
//! of the last close. An undefined ratio selects the normal regime.

use crate::models::MacdPeriods;

pub const MACD_HIGH_VOLATILITY_RATIO: f64 = 3.0;
pub const MACD_LOW_VOLATILITY_RATIO: f64 = 1.0;
pub const BAND_HIGH_VOLATILITY_RATIO: f64 = 4.0;
pub const BAND_LOW_VOLATILITY_RATIO: f64 = 1.5;

pub fn volatility_ratio(atr: Option<f64>, close: f64) -> Option<f64> {
    let atr = atr?;
    if close <= 0.0 || !close.is_finite() {
        return None;
    }
    Some(atr / close * 100.0)
}

/// Faster EMAs in volatile markets, slower ones in quiet markets
pub fn select_macd_periods(ratio: Option<f64>) -> MacdPeriods {
    match ratio {
        Some(vr) if vr > MACD_HIGH_VOLATILITY_RATIO => MacdPeriods::HIGH_VOLATILITY,
        Some(vr) if vr < MACD_LOW_VOLATILITY_RATIO => MacdPeriods::LOW_VOLATILITY,
        _ => MacdPeriods::NORMAL,
    }
}

/// Standard-deviation multiplier for the Bollinger Bands
pub fn band_multiplier(ratio: Option<f64>) -> f64 {
    match ratio {
        Some(vr) if vr > BAND_HIGH_VOLATILITY_RATIO => 2.5,
        Some(vr) if vr < BAND_LOW_VOLATILITY_RATIO => 1.5,
        _ => 2.0,
    }
}
