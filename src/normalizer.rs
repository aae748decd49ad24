//! Bar sequence cleaning ahead of indicator computation.
//!
//! Two passes, in order:
//! 1. Outlier clamp: a close more than 10% away from the trailing 20-bar
//!    median of raw closes is replaced by that median.
//! 2. Gap fill: missing values are forward-filled per column. A leading gap
//!    takes the first known value of its column.

use thiserror::Error;
use tracing::debug;

use crate::common::math;
use crate::models::{PriceBar, RawBar};

pub const MEDIAN_WINDOW: usize = 20;
pub const OUTLIER_BAND: f64 = 0.10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no bars to normalize")]
    Empty,
    #[error("column `{0}` has no values")]
    MissingColumn(&'static str),
}

/// Clean a raw bar sequence. Output has the same length and order as the input.
pub fn normalize(bars: &[RawBar]) -> Result<Vec<PriceBar>, NormalizeError> {
    if bars.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let closes: Vec<Option<f64>> = bars.iter().map(|b| b.close).collect();
    let medians = math::rolling_median(&closes, MEDIAN_WINDOW);

    let mut clamped = 0usize;
    let clamped_closes: Vec<Option<f64>> = closes
        .iter()
        .zip(&medians)
        .map(|(close, median)| match (*close, *median) {
            (Some(c), Some(m)) if is_outlier(c, m) => {
                clamped += 1;
                Some(m)
            }
            _ => *close,
        })
        .collect();

    let opens = fill_column("open", bars.iter().map(|b| b.open).collect())?;
    let highs = fill_column("high", bars.iter().map(|b| b.high).collect())?;
    let lows = fill_column("low", bars.iter().map(|b| b.low).collect())?;
    let closes = fill_column("close", clamped_closes)?;
    let volumes = fill_column("volume", bars.iter().map(|b| b.volume).collect())?;

    if clamped > 0 {
        debug!(clamped = clamped, bars = bars.len(), "Normalizer: clamped outlier closes");
    }

    Ok(bars
        .iter()
        .enumerate()
        .map(|(i, bar)| PriceBar::new(opens[i], highs[i], lows[i], closes[i], volumes[i], bar.timestamp))
        .collect())
}

fn is_outlier(close: f64, median: f64) -> bool {
    close > median * (1.0 + OUTLIER_BAND) || close < median * (1.0 - OUTLIER_BAND)
}

fn fill_column(name: &'static str, values: Vec<Option<f64>>) -> Result<Vec<f64>, NormalizeError> {
    let mut last = values
        .iter()
        .flatten()
        .next()
        .copied()
        .ok_or(NormalizeError::MissingColumn(name))?;

    Ok(values
        .into_iter()
        .map(|value| {
            if let Some(v) = value {
                last = v;
            }
            last
        })
        .collect())
}
