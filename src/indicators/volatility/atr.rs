//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::PriceBar;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// True range per bar; the first bar has no previous close
pub fn true_ranges(bars: &[PriceBar]) -> Vec<Option<f64>> {
    let mut ranges = Vec::with_capacity(bars.len());
    if !bars.is_empty() {
        ranges.push(None);
    }
    ranges.extend(
        bars.windows(2)
            .map(|pair| Some(math::true_range(pair[1].high, pair[1].low, pair[0].close))),
    );
    ranges
}

/// Calculate ATR (Average True Range)
///
/// Simple rolling mean of the true range; the first `period` bars are undefined.
pub fn calculate_atr(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(&true_ranges(bars), period)
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(bars: &[PriceBar]) -> Vec<Option<f64>> {
    calculate_atr(bars, DEFAULT_ATR_PERIOD)
}
