//! Unit tests for signal labels and wire formats

use serde_json::json;
use strikewise::models::{ConfidenceTier, Direction, OptionType, StrategyLabel};

#[test]
fn test_label_texts() {
    let cases = [
        (Direction::Bullish, ConfidenceTier::High, "high-confidence bullish", "Buy ITM Call (CE)"),
        (Direction::Bullish, ConfidenceTier::Moderate, "moderate bullish", "Buy ATM Call (CE)"),
        (Direction::Bearish, ConfidenceTier::High, "high-confidence bearish", "Buy ITM Put (PE)"),
        (Direction::Bearish, ConfidenceTier::Moderate, "moderate bearish", "Buy ATM Put (PE)"),
    ];
    for (direction, tier, description, suggestion) in cases {
        let label = StrategyLabel::new(direction, tier);
        assert_eq!(label.description(), description);
        assert_eq!(label.suggestion(), suggestion);
    }
}

#[test]
fn test_neutral_combinations_collapse_to_no_signal() {
    assert_eq!(StrategyLabel::new(Direction::Neutral, ConfidenceTier::High), StrategyLabel::NO_SIGNAL);
    assert_eq!(StrategyLabel::new(Direction::Bullish, ConfidenceTier::None), StrategyLabel::NO_SIGNAL);
    assert_eq!(StrategyLabel::NO_SIGNAL.description(), "no dominant signal");
    assert_eq!(StrategyLabel::NO_SIGNAL.suggestion(), "Wait for clearer signals");
    assert_eq!(StrategyLabel::NO_SIGNAL.option_type(), None);
}

#[test]
fn test_label_option_type() {
    let bullish = StrategyLabel::new(Direction::Bullish, ConfidenceTier::High);
    let bearish = StrategyLabel::new(Direction::Bearish, ConfidenceTier::Moderate);
    assert_eq!(bullish.option_type(), Some(OptionType::Call));
    assert_eq!(bearish.option_type(), Some(OptionType::Put));
    assert_eq!(OptionType::Put.code(), "PE");
}

#[test]
fn test_label_serialization() {
    let label = StrategyLabel::new(Direction::Bullish, ConfidenceTier::Moderate);
    assert_eq!(
        serde_json::to_value(label).unwrap(),
        json!({
            "direction": "BULLISH",
            "tier": "moderate",
            "label": "moderate bullish",
            "suggestion": "Buy ATM Call (CE)"
        })
    );
    assert_eq!(serde_json::to_value(OptionType::Call).unwrap(), json!("CE"));
}

#[test]
fn test_direction_parsing() {
    assert_eq!("bullish".parse::<Direction>(), Ok(Direction::Bullish));
    assert_eq!("NEUTRAL".parse::<Direction>(), Ok(Direction::Neutral));
    assert!("sideways".parse::<Direction>().is_err());
    assert_eq!(Direction::Bearish.to_string(), "BEARISH");
}
