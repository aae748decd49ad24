use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::option::OptionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Bullish => "BULLISH",
            Direction::Bearish => "BEARISH",
            Direction::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BULLISH" => Ok(Direction::Bullish),
            "BEARISH" => Ok(Direction::Bearish),
            "NEUTRAL" => Ok(Direction::Neutral),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Moderate,
    None,
}

/// Direction plus conviction, rendered as a label and an option play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategyLabel {
    pub direction: Direction,
    pub tier: ConfidenceTier,
}

impl StrategyLabel {
    pub const NO_SIGNAL: StrategyLabel = StrategyLabel {
        direction: Direction::Neutral,
        tier: ConfidenceTier::None,
    };

    pub fn new(direction: Direction, tier: ConfidenceTier) -> Self {
        match (direction, tier) {
            (Direction::Neutral, _) | (_, ConfidenceTier::None) => Self::NO_SIGNAL,
            _ => Self { direction, tier },
        }
    }

    pub fn description(&self) -> &'static str {
        match (self.direction, self.tier) {
            (Direction::Bullish, ConfidenceTier::High) => "high-confidence bullish",
            (Direction::Bullish, ConfidenceTier::Moderate) => "moderate bullish",
            (Direction::Bearish, ConfidenceTier::High) => "high-confidence bearish",
            (Direction::Bearish, ConfidenceTier::Moderate) => "moderate bearish",
            _ => "no dominant signal",
        }
    }

    /// Option contract matching the direction, if any
    pub fn option_type(&self) -> Option<OptionType> {
        match self.direction {
            Direction::Bullish => Some(OptionType::Call),
            Direction::Bearish => Some(OptionType::Put),
            Direction::Neutral => None,
        }
    }

    /// Suggested trade: in-the-money for high conviction, at-the-money otherwise
    pub fn suggestion(&self) -> &'static str {
        match (self.direction, self.tier) {
            (Direction::Bullish, ConfidenceTier::High) => "Buy ITM Call (CE)",
            (Direction::Bullish, ConfidenceTier::Moderate) => "Buy ATM Call (CE)",
            (Direction::Bearish, ConfidenceTier::High) => "Buy ITM Put (PE)",
            (Direction::Bearish, ConfidenceTier::Moderate) => "Buy ATM Put (PE)",
            _ => "Wait for clearer signals",
        }
    }
}

impl fmt::Display for StrategyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.description(), self.suggestion())
    }
}

impl Serialize for StrategyLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StrategyLabel", 4)?;
        state.serialize_field("direction", &self.direction)?;
        state.serialize_field("tier", &self.tier)?;
        state.serialize_field("label", self.description())?;
        state.serialize_field("suggestion", self.suggestion())?;
        state.end()
    }
}

/// Per-strategy components of one scoring pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalScore {
    pub scalp_component: f64,
    pub momentum_component: f64,
    pub mean_reversion_component: f64,
    pub trend_component: f64,
    pub total: f64,
    /// In evaluation order
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: Direction,
    pub confidence: f64,
    pub strategy_label: StrategyLabel,
    pub current_price: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub sma50: Option<f64>,
    pub poc: Option<f64>,
    pub reasoning: String,
}

/// Audit record written for every completed evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalLogRecord {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub current_price: f64,
    pub predicted_direction: Direction,
    pub confidence_score: f64,
    pub suggested_strategy: String,
    pub user_id: Option<String>,
}
