//! Unit tests for score to prediction mapping

use strikewise::models::{ConfidenceTier, Direction, StrategyLabel};
use strikewise::signals::decide;

use crate::support::approx;

#[test]
fn test_high_conviction_bullish() {
    let decision = decide(5.0);
    assert_eq!(decision.direction, Direction::Bullish);
    assert!(approx(decision.confidence, 0.85));
    assert_eq!(decision.label, StrategyLabel::new(Direction::Bullish, ConfidenceTier::High));
}

#[test]
fn test_high_conviction_threshold_and_cap() {
    assert!(approx(decide(3.0).confidence, 0.75));
    assert_eq!(decide(3.0).label.tier, ConfidenceTier::High);
    assert_eq!(decide(10.0).confidence, 0.95);
    assert_eq!(decide(-10.0).confidence, 0.95);
}

#[test]
fn test_moderate_scores() {
    for total in [1.0, 2.5, 2.99] {
        let decision = decide(total);
        assert_eq!(decision.direction, Direction::Bullish);
        assert_eq!(decision.confidence, 0.65);
        assert_eq!(decision.label.tier, ConfidenceTier::Moderate);
    }

    let bearish = decide(-1.0);
    assert_eq!(bearish.direction, Direction::Bearish);
    assert_eq!(bearish.label.suggestion(), "Buy ATM Put (PE)");
}

#[test]
fn test_high_conviction_bearish() {
    let decision = decide(-4.0);
    assert_eq!(decision.direction, Direction::Bearish);
    assert!(approx(decision.confidence, 0.8));
    assert_eq!(decision.label.description(), "high-confidence bearish");
}

#[test]
fn test_weak_scores_are_neutral() {
    for total in [0.0, 0.5, -0.99] {
        let decision = decide(total);
        assert_eq!(decision.direction, Direction::Neutral);
        assert_eq!(decision.confidence, 0.5);
        assert_eq!(decision.label, StrategyLabel::NO_SIGNAL);
    }
}
