//! Unit tests for ATR indicator

use strikewise::indicators::volatility::{calculate_atr, calculate_atr_default, true_ranges};
use strikewise::models::PriceBar;

use crate::support::{flat_bars, ts};

#[test]
fn test_true_ranges_first_bar_undefined() {
    let ranges = true_ranges(&flat_bars(3, 100.0));
    assert_eq!(ranges, vec![None, Some(2.0), Some(2.0)]);
    assert!(true_ranges(&[]).is_empty());
}

#[test]
fn test_atr_warm_up() {
    let atr = calculate_atr_default(&flat_bars(20, 100.0));
    assert!(atr[..14].iter().all(Option::is_none));
    assert_eq!(atr[14], Some(2.0));
    assert_eq!(atr[19], Some(2.0));
}

#[test]
fn test_atr_includes_gaps() {
    // Gap up: true range measured from the previous close
    let bars = vec![
        PriceBar::new(100.0, 101.0, 99.0, 100.0, 1.0, ts(0)),
        PriceBar::new(110.0, 111.0, 109.0, 110.0, 1.0, ts(1)),
        PriceBar::new(110.0, 111.0, 109.0, 110.0, 1.0, ts(2)),
    ];
    let atr = calculate_atr(&bars, 2);
    assert_eq!(atr[2], Some((11.0 + 2.0) / 2.0));
}
