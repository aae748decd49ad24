//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::PriceBar;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate RSI for every bar
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss, both simple means over `period` close diffs.
/// The first `period` bars are undefined.
pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(bars.len());
    let mut losses = Vec::with_capacity(bars.len());
    gains.push(None);
    losses.push(None);

    for pair in bars.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(Some(change.max(0.0)));
        losses.push(Some((-change).max(0.0)));
    }
    gains.truncate(bars.len());
    losses.truncate(bars.len());

    let avg_gains = math::rolling_mean(&gains, period);
    let avg_losses = math::rolling_mean(&losses, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| Some(rsi_from_averages(gain?, loss?)))
        .collect()
}

/// RSI from average gain and loss. A zero average loss pins RSI at 100.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(bars: &[PriceBar]) -> Vec<Option<f64>> {
    calculate_rsi(bars, DEFAULT_RSI_PERIOD)
}
