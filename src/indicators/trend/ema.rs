//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::PriceBar;

/// EMA of closes for a span, seeded with the first close
pub fn calculate_ema(bars: &[PriceBar], span: usize) -> Vec<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::ema_series(&closes, span)
}
