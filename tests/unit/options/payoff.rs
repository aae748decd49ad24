//! Unit tests for option payoff projection

use strikewise::models::OptionType;
use strikewise::options::{nearest_strike, payoff_graph, profit_at, PayoffError, PAYOFF_POINTS};

use crate::support::approx;

#[test]
fn test_call_profit_at_expiry() {
    assert_eq!(profit_at(OptionType::Call, 100.0, 5.0, 110.0), 5.0);
    assert_eq!(profit_at(OptionType::Call, 100.0, 5.0, 90.0), -5.0);
}

#[test]
fn test_put_profit_at_expiry() {
    assert_eq!(profit_at(OptionType::Put, 100.0, 5.0, 90.0), 5.0);
    assert_eq!(profit_at(OptionType::Put, 100.0, 5.0, 110.0), -5.0);
}

#[test]
fn test_payoff_graph_spans_strike_band() {
    let graph = payoff_graph(OptionType::Call, 100.0, 5.0).unwrap();
    assert_eq!(graph.len(), PAYOFF_POINTS);

    let first = graph.first().unwrap();
    let last = graph.last().unwrap();
    assert!(approx(first.spot, 90.0));
    assert!(approx(first.profit, -5.0));
    assert!(approx(last.spot, 110.0));
    assert!(approx(last.profit, 5.0));
    assert!(graph.windows(2).all(|w| w[0].spot < w[1].spot));
}

#[test]
fn test_payoff_loss_is_capped_at_premium() {
    let graph = payoff_graph(OptionType::Put, 200.0, 12.0).unwrap();
    assert!(graph.iter().all(|p| p.profit >= -12.0));
}

#[test]
fn test_payoff_rejects_invalid_inputs() {
    assert_eq!(payoff_graph(OptionType::Call, 0.0, 5.0), Err(PayoffError::InvalidStrike(0.0)));
    assert_eq!(payoff_graph(OptionType::Call, 100.0, -1.0), Err(PayoffError::InvalidPremium(-1.0)));
    assert!(payoff_graph(OptionType::Put, f64::NAN, 5.0).is_err());
}

#[test]
fn test_nearest_strike() {
    assert_eq!(nearest_strike(22_013.0, 50.0), Some(22_000.0));
    assert_eq!(nearest_strike(22_030.0, 50.0), Some(22_050.0));
    assert_eq!(nearest_strike(125.0, 50.0), Some(100.0));
    assert_eq!(nearest_strike(175.0, 50.0), Some(200.0));
    assert_eq!(nearest_strike(10.0, 50.0), None);
    assert_eq!(nearest_strike(100.0, 0.0), None);
}
