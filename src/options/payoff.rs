//! Expiry payoff of a long call or put across a band of spot prices

use thiserror::Error;

use crate::models::{OptionType, PayoffPoint};

pub const PAYOFF_POINTS: usize = 20;
pub const SPOT_RANGE_LOW: f64 = 0.9;
pub const SPOT_RANGE_HIGH: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayoffError {
    #[error("strike must be positive and finite, got {0}")]
    InvalidStrike(f64),
    #[error("premium must be non-negative and finite, got {0}")]
    InvalidPremium(f64),
}

/// Profit at expiry for one spot price
pub fn profit_at(option_type: OptionType, strike: f64, premium: f64, spot: f64) -> f64 {
    let intrinsic = match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    };
    intrinsic - premium
}

/// Profit at 20 evenly spaced spots over [0.9 * strike, 1.1 * strike],
/// both ends included
pub fn payoff_graph(
    option_type: OptionType,
    strike: f64,
    premium: f64,
) -> Result<Vec<PayoffPoint>, PayoffError> {
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PayoffError::InvalidStrike(strike));
    }
    if !(premium.is_finite() && premium >= 0.0) {
        return Err(PayoffError::InvalidPremium(premium));
    }

    let start = strike * SPOT_RANGE_LOW;
    let stop = strike * SPOT_RANGE_HIGH;
    let step = (stop - start) / (PAYOFF_POINTS - 1) as f64;

    Ok((0..PAYOFF_POINTS)
        .map(|i| {
            let spot = if i == PAYOFF_POINTS - 1 {
                stop
            } else {
                start + step * i as f64
            };
            PayoffPoint {
                spot,
                profit: profit_at(option_type, strike, premium, spot),
            }
        })
        .collect())
}

/// Nearest listed strike: price rounded to a multiple of `step`, ties to even
pub fn nearest_strike(price: f64, step: f64) -> Option<f64> {
    if !(step.is_finite() && step > 0.0 && price.is_finite()) {
        return None;
    }
    let strike = (price / step).round_ties_even() * step;
    (strike > 0.0).then_some(strike)
}
