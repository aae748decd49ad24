//! Unit tests for shared math helpers

use strikewise::common::math::{
    ema_series, mean, median, rolling_mean, rolling_median, rolling_sample_std, sample_std,
    true_range,
};

use crate::support::approx;

#[test]
fn test_mean_and_empty() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    assert_eq!(mean(&[]), None);
}

#[test]
fn test_median_odd_and_even() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median(&[]), None);
}

#[test]
fn test_sample_std_uses_n_minus_one() {
    let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    assert!(approx(std, (32.0_f64 / 7.0).sqrt()));
    assert_eq!(sample_std(&[1.0]), None);
}

#[test]
fn test_true_range_picks_largest_gap() {
    assert_eq!(true_range(10.0, 8.0, 12.0), 4.0);
    assert_eq!(true_range(10.0, 8.0, 9.0), 2.0);
    assert_eq!(true_range(10.0, 8.0, 5.0), 5.0);
}

#[test]
fn test_rolling_mean_warm_up() {
    let values = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
    assert_eq!(
        rolling_mean(&values, 2),
        vec![None, Some(1.5), Some(2.5), Some(3.5)]
    );
}

#[test]
fn test_rolling_window_with_gap_is_undefined() {
    let values = [Some(1.0), None, Some(3.0), Some(4.0)];
    assert_eq!(rolling_mean(&values, 2), vec![None, None, None, Some(3.5)]);
    assert_eq!(rolling_median(&values, 2), vec![None, None, None, Some(3.5)]);
}

#[test]
fn test_rolling_sample_std_constant_is_zero() {
    let values = vec![Some(5.0); 4];
    let std = rolling_sample_std(&values, 3);
    assert_eq!(std[1], None);
    assert_eq!(std[2], Some(0.0));
    assert_eq!(std[3], Some(0.0));
}

#[test]
fn test_ema_series_seeded_with_first_value() {
    assert_eq!(ema_series(&[1.0, 2.0, 3.0], 3), vec![1.0, 1.5, 2.25]);
    assert_eq!(ema_series(&[1.0, 2.0, 3.0], 1), vec![1.0, 2.0, 3.0]);
    assert!(ema_series(&[], 5).is_empty());
}
