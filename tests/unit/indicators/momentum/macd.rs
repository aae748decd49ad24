//! Unit tests for MACD indicator

use strikewise::indicators::momentum::calculate_macd;
use strikewise::models::MacdPeriods;

use crate::support::{approx, flat_bars, trending_bars, wavy_bars};

#[test]
fn test_macd_flat_prices_are_zero() {
    let macd = calculate_macd(&flat_bars(60, 100.0), MacdPeriods::NORMAL);
    assert!(macd.macd.iter().all(|v| approx(*v, 0.0)));
    assert!(macd.signal.iter().all(|v| approx(*v, 0.0)));
}

#[test]
fn test_macd_positive_in_uptrend() {
    let macd = calculate_macd(&trending_bars(100, 100.0, 0.5), MacdPeriods::NORMAL);
    assert!(*macd.macd.last().unwrap() > 0.0);
    assert_eq!(macd.periods, MacdPeriods::NORMAL);
}

#[test]
fn test_macd_negative_in_downtrend() {
    let macd = calculate_macd(&trending_bars(100, 200.0, -0.5), MacdPeriods::HIGH_VOLATILITY);
    assert!(*macd.macd.last().unwrap() < 0.0);
    assert_eq!(macd.periods, MacdPeriods::HIGH_VOLATILITY);
}

#[test]
fn test_macd_one_value_per_bar() {
    let bars = wavy_bars(45, 100.0, 3.0);
    let macd = calculate_macd(&bars, MacdPeriods::LOW_VOLATILITY);
    assert_eq!(macd.macd.len(), 45);
    assert_eq!(macd.signal.len(), 45);
    assert_eq!(macd.macd[0], 0.0);
}
