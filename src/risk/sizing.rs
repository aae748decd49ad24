//! Position sizing: fractional Kelly capital allocation, ATR-based stops
//! and order quantity from the stop distance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PositionSizing, TradeSide};

/// Share of the full Kelly fraction actually applied
pub const KELLY_FRACTION: f64 = 0.25;
/// Hard cap on the capital fraction of a single trade
pub const MAX_CAPITAL_FRACTION: f64 = 0.15;
/// Target distance as a multiple of the stop distance
pub const REWARD_TO_RISK: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("average loss must be positive, got {0}")]
    UndefinedAvgLoss(f64),
    #[error("average win must be positive, got {0}")]
    InvalidAvgWin(f64),
    #[error("win rate must be within [0, 1], got {0}")]
    InvalidWinRate(f64),
    #[error("account balance must be non-negative, got {0}")]
    InvalidBalance(f64),
}

/// Account and track-record inputs to the sizing rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    pub account_balance: f64,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            account_balance: 10_000.0,
            win_rate: 0.55,
            avg_win: 1.5,
            avg_loss: 1.0,
        }
    }
}

/// Fractional Kelly capital fraction.
///
/// f* = (b*p - q) / b with b = avg_win / avg_loss, then scaled by 0.25 and by
/// the signal confidence, floored at 0 and capped at 0.15.
pub fn kelly_fraction(win_rate: f64, avg_win: f64, avg_loss: f64, confidence: f64) -> Result<f64, RiskError> {
    if !(avg_loss.is_finite() && avg_loss > 0.0) {
        return Err(RiskError::UndefinedAvgLoss(avg_loss));
    }
    if !(avg_win.is_finite() && avg_win > 0.0) {
        return Err(RiskError::InvalidAvgWin(avg_win));
    }
    if !(0.0..=1.0).contains(&win_rate) {
        return Err(RiskError::InvalidWinRate(win_rate));
    }

    let b = avg_win / avg_loss;
    let p = win_rate;
    let q = 1.0 - p;
    let kelly = (b * p - q) / b;

    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok((kelly * KELLY_FRACTION * confidence).clamp(0.0, MAX_CAPITAL_FRACTION))
}

/// ATR multiple for the stop: wider in volatile conditions, tighter in calm ones
pub fn stop_multiplier(volatility_ratio: f64) -> f64 {
    if volatility_ratio > 1.5 {
        2.5
    } else if volatility_ratio < 0.7 {
        1.5
    } else {
        2.0
    }
}

/// Stop-loss and take-profit levels for an entry
pub fn dynamic_stops(entry_price: f64, atr: f64, side: TradeSide, volatility_ratio: f64) -> (f64, f64) {
    let distance = atr * stop_multiplier(volatility_ratio);
    match side {
        TradeSide::Long => (entry_price - distance, entry_price + distance * REWARD_TO_RISK),
        TradeSide::Short => (entry_price + distance, entry_price - distance * REWARD_TO_RISK),
    }
}

/// Whole units whose loss at the stop equals `risk_amount`; 0 for a zero stop distance
pub fn quantity_for(risk_amount: f64, entry_price: f64, stop_loss: f64) -> u64 {
    let distance = (entry_price - stop_loss).abs();
    if !(distance.is_finite() && distance > 0.0) || !(risk_amount.is_finite() && risk_amount > 0.0) {
        return 0;
    }
    (risk_amount / distance).floor() as u64
}

/// Sizing rule bound to validated account parameters
#[derive(Debug, Clone)]
pub struct RiskSizer {
    params: RiskParams,
}

impl RiskSizer {
    pub fn new(params: RiskParams) -> Result<Self, RiskError> {
        if !(params.account_balance.is_finite() && params.account_balance >= 0.0) {
            return Err(RiskError::InvalidBalance(params.account_balance));
        }
        kelly_fraction(params.win_rate, params.avg_win, params.avg_loss, 1.0)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &RiskParams {
        &self.params
    }

    pub fn capital_fraction(&self, confidence: f64) -> f64 {
        kelly_fraction(
            self.params.win_rate,
            self.params.avg_win,
            self.params.avg_loss,
            confidence,
        )
        .unwrap_or(0.0)
    }

    /// Full recommendation for one trade
    pub fn size(
        &self,
        entry_price: f64,
        atr: f64,
        side: TradeSide,
        confidence: f64,
        volatility_ratio: f64,
    ) -> PositionSizing {
        let capital_fraction = self.capital_fraction(confidence);
        let risk_amount = self.params.account_balance * capital_fraction;
        let (stop_loss, take_profit) = dynamic_stops(entry_price, atr, side, volatility_ratio);

        PositionSizing {
            capital_fraction,
            stop_loss,
            take_profit,
            quantity: quantity_for(risk_amount, entry_price, stop_loss),
            risk_amount,
        }
    }
}
