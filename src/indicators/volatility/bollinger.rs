//! Bollinger Bands indicator

use crate::common::math;
use crate::models::PriceBar;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (multiplier * sample standard deviation)
/// Lower Band = Middle - (multiplier * sample standard deviation)
pub fn calculate_bollinger_bands(bars: &[PriceBar], period: usize, multiplier: f64) -> BollingerSeries {
    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
    let middle = math::rolling_mean(&closes, period);
    let std = math::rolling_sample_std(&closes, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&std)
            .map(|(&m, &s)| Some(m? + sign * multiplier * s?))
            .collect()
    };

    BollingerSeries {
        upper: band(1.0),
        lower: band(-1.0),
        middle,
    }
}
