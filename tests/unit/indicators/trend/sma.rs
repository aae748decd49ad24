//! Unit tests for SMA indicator

use strikewise::indicators::trend::calculate_sma;

use crate::support::bars_from_closes;

#[test]
fn test_sma_values() {
    let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(
        calculate_sma(&bars, 3),
        vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
    );
}

#[test]
fn test_sma_insufficient_data() {
    let bars = bars_from_closes(&[1.0; 49]);
    assert!(calculate_sma(&bars, 50).iter().all(Option::is_none));
}
