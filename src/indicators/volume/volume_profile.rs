//! Volume profile point of control (POC)

use crate::models::{PriceBar, VolumeProfile};

pub const VOLUME_PROFILE_LOOKBACK: usize = 100;
pub const VOLUME_PROFILE_BINS: usize = 20;

/// Bin the trailing `lookback` closes into `bins` equal-width price buckets,
/// sum volume per bucket and return the midpoint of the heaviest bucket.
///
/// The maximum close lands in the last bucket; ties go to the lowest bucket.
/// A flat price range has no profile.
pub fn calculate_volume_profile(bars: &[PriceBar], lookback: usize, bins: usize) -> VolumeProfile {
    let recent = &bars[bars.len().saturating_sub(lookback)..];
    if recent.is_empty() || bins == 0 {
        return VolumeProfile::default();
    }

    let (min, max) = recent.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), bar| {
        (lo.min(bar.close), hi.max(bar.close))
    });
    if max <= min {
        return VolumeProfile::default();
    }

    let width = (max - min) / bins as f64;
    let mut volumes = vec![0.0_f64; bins];
    for bar in recent {
        let index = (((bar.close - min) / width).floor() as usize).min(bins - 1);
        volumes[index] += bar.volume;
    }

    let mut best = 0;
    for (i, volume) in volumes.iter().enumerate() {
        if *volume > volumes[best] {
            best = i;
        }
    }

    VolumeProfile {
        poc_price: Some(min + width * (best as f64 + 0.5)),
    }
}

/// Volume profile over the last 100 bars with 20 buckets
pub fn calculate_volume_profile_default(bars: &[PriceBar]) -> VolumeProfile {
    calculate_volume_profile(bars, VOLUME_PROFILE_LOOKBACK, VOLUME_PROFILE_BINS)
}
