//! Full indicator pass over a normalized bar sequence

use tracing::debug;

use crate::indicators::momentum::{calculate_macd, calculate_rsi_default};
use crate::indicators::regime::{band_multiplier, select_macd_periods, volatility_ratio};
use crate::indicators::trend::calculate_sma;
use crate::indicators::volatility::{
    calculate_atr_default, calculate_bollinger_bands, DEFAULT_BOLLINGER_PERIOD,
};
use crate::indicators::volume::calculate_volume_profile_default;
use crate::models::{IndicatorFrame, IndicatorSet, PriceBar};

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute every indicator for every bar.
    ///
    /// Short histories are not an error: indicators whose window is not yet
    /// filled stay `None`.
    pub fn compute(bars: &[PriceBar]) -> IndicatorFrame {
        let atr = calculate_atr_default(bars);
        let rsi = calculate_rsi_default(bars);
        let sma20 = calculate_sma(bars, 20);
        let sma50 = calculate_sma(bars, 50);
        let sma200 = calculate_sma(bars, 200);

        let ratio = bars
            .last()
            .and_then(|last| volatility_ratio(atr.last().copied().flatten(), last.close));
        let macd_periods = select_macd_periods(ratio);
        let multiplier = band_multiplier(ratio);

        let macd = calculate_macd(bars, macd_periods);
        let bands = calculate_bollinger_bands(bars, DEFAULT_BOLLINGER_PERIOD, multiplier);
        let volume_profile = calculate_volume_profile_default(bars);

        let sets = (0..bars.len())
            .map(|i| IndicatorSet {
                atr: atr[i],
                rsi: rsi[i],
                sma20: sma20[i],
                sma50: sma50[i],
                sma200: sma200[i],
                macd: macd.macd.get(i).copied(),
                signal_line: macd.signal.get(i).copied(),
                bb_upper: bands.upper[i],
                bb_lower: bands.lower[i],
            })
            .collect();

        debug!(
            bars = bars.len(),
            volatility_ratio = ?ratio,
            macd_periods = ?macd_periods,
            band_multiplier = multiplier,
            poc = ?volume_profile.poc_price,
            "IndicatorEngine: computed indicator frame"
        );

        IndicatorFrame {
            sets,
            volume_profile,
            volatility_ratio: ratio,
            macd_periods,
            band_multiplier: multiplier,
        }
    }
}
