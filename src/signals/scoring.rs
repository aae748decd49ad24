//! Strategy components of the composite score.
//!
//! Each component reads the latest bar (and the one before it for
//! crossovers) and returns its contribution plus human-readable reasons.
//! A condition whose inputs are undefined never fires.

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::models::{IndicatorFrame, IndicatorSet, PriceBar};

pub const VOLUME_LOOKBACK: usize = 20;
pub const BREAKOUT_LOOKBACK: usize = 20;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_REVERSION_OVERSOLD: f64 = 35.0;
const RSI_REVERSION_OVERBOUGHT: f64 = 65.0;
const SCALP_VOLUME_SPIKE: f64 = 1.5;
const BREAKOUT_VOLUME: f64 = 1.3;
const NEAR_HIGH: f64 = 0.995;

/// Everything the components look at, taken from the tail of a bar sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringInput {
    pub current: IndicatorSet,
    pub previous: Option<IndicatorSet>,
    pub price: f64,
    pub volume: f64,
    /// Mean volume over the last 20 bars, current bar included
    pub avg_volume: f64,
    /// Highest high over the last 20 bars
    pub recent_high: f64,
    pub poc: Option<f64>,
}

impl ScoringInput {
    pub fn from_frame(bars: &[PriceBar], frame: &IndicatorFrame) -> Option<Self> {
        let last = bars.last()?;
        let current = *frame.latest()?;

        let volumes: Vec<f64> = tail(bars, VOLUME_LOOKBACK).iter().map(|b| b.volume).collect();
        let recent_high = tail(bars, BREAKOUT_LOOKBACK)
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            current,
            previous: frame.previous().copied(),
            price: last.close,
            volume: last.volume,
            avg_volume: math::mean(&volumes).unwrap_or(0.0),
            recent_high,
            poc: frame.volume_profile.poc_price,
        })
    }
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Contribution of one strategy component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    Bullish,
    Bearish,
    None,
}

/// MACD crossing its signal line on the latest bar
pub fn detect_crossover(previous: Option<&IndicatorSet>, current: &IndicatorSet) -> CrossoverType {
    let (Some(prev), Some(macd), Some(signal)) = (previous, current.macd, current.signal_line) else {
        return CrossoverType::None;
    };
    let (Some(prev_macd), Some(prev_signal)) = (prev.macd, prev.signal_line) else {
        return CrossoverType::None;
    };

    if macd > signal && prev_macd <= prev_signal {
        CrossoverType::Bullish
    } else if macd < signal && prev_macd >= prev_signal {
        CrossoverType::Bearish
    } else {
        CrossoverType::None
    }
}

/// Short-horizon scalping: RSI extremes and fresh MACD crossovers,
/// amplified by a volume spike
pub fn scalp_component(input: &ScoringInput) -> Component {
    let mut component = Component::default();

    match input.current.rsi {
        Some(rsi) if rsi < RSI_OVERSOLD => component.score += 2.0,
        Some(rsi) if rsi > RSI_OVERBOUGHT => component.score -= 2.0,
        _ => {}
    }

    match detect_crossover(input.previous.as_ref(), &input.current) {
        CrossoverType::Bullish => component.score += 2.0,
        CrossoverType::Bearish => component.score -= 2.0,
        CrossoverType::None => {}
    }

    if input.volume > input.avg_volume * SCALP_VOLUME_SPIKE {
        component.score *= 1.5;
        component.reasons.push("Scalping: Volume spike detected.".to_string());
    }

    component
}

/// Breakout toward the recent high, confirmed by volume
pub fn momentum_component(input: &ScoringInput) -> Component {
    let mut component = Component::default();

    if input.price > input.recent_high * NEAR_HIGH {
        component
            .reasons
            .push("Momentum: Price near 20-period high.".to_string());
        if input.volume > input.avg_volume * BREAKOUT_VOLUME {
            component.score += 2.0;
            component
                .reasons
                .push("Momentum: Breakout confirmed by volume.".to_string());
        }
    }

    component
}

/// Fade moves outside the Bollinger Bands when RSI agrees
pub fn mean_reversion_component(input: &ScoringInput) -> Component {
    let mut component = Component::default();
    let IndicatorSet {
        rsi, bb_lower, bb_upper, ..
    } = input.current;
    let (Some(rsi), Some(lower), Some(upper)) = (rsi, bb_lower, bb_upper) else {
        return component;
    };

    if input.price < lower && rsi < RSI_REVERSION_OVERSOLD {
        component.score += 2.0;
        component
            .reasons
            .push("Mean Reversion: Price below lower BB with oversold RSI.".to_string());
    } else if input.price > upper && rsi > RSI_REVERSION_OVERBOUGHT {
        component.score -= 2.0;
        component
            .reasons
            .push("Mean Reversion: Price above upper BB with overbought RSI.".to_string());
    }

    component
}

/// Position relative to the volume point of control
pub fn trend_component(input: &ScoringInput) -> Component {
    let Some(poc) = input.poc else {
        return Component::default();
    };

    if input.price > poc {
        Component {
            score: 1.0,
            reasons: vec![format!("Trend: Above Volume POC ({:.2}).", poc)],
        }
    } else {
        Component {
            score: -1.0,
            reasons: vec![format!("Trend: Below Volume POC ({:.2}).", poc)],
        }
    }
}
