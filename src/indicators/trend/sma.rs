//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::PriceBar;

/// Rolling mean of closes; undefined until `period` bars are available
pub fn calculate_sma(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
    math::rolling_mean(&closes, period)
}
