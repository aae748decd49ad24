//! Mapping of the composite score to a prediction

use crate::models::{ConfidenceTier, Direction, StrategyLabel};

pub const HIGH_CONVICTION_SCORE: f64 = 3.0;
pub const MODERATE_SCORE: f64 = 1.0;
pub const MODERATE_CONFIDENCE: f64 = 0.65;
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;
pub const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub direction: Direction,
    pub confidence: f64,
    pub label: StrategyLabel,
}

/// Map a composite score to direction, confidence and label.
///
/// |total| >= 3 scales confidence with the score up to 0.95;
/// 1 <= |total| < 3 is a flat 0.65; anything smaller is neutral.
pub fn decide(total: f64) -> Decision {
    let direction = if total >= MODERATE_SCORE {
        Direction::Bullish
    } else if total <= -MODERATE_SCORE {
        Direction::Bearish
    } else {
        return Decision {
            direction: Direction::Neutral,
            confidence: NEUTRAL_CONFIDENCE,
            label: StrategyLabel::NO_SIGNAL,
        };
    };

    let strength = total.abs();
    let (confidence, tier) = if strength >= HIGH_CONVICTION_SCORE {
        ((0.6 + 0.05 * strength).min(MAX_CONFIDENCE), ConfidenceTier::High)
    } else {
        (MODERATE_CONFIDENCE, ConfidenceTier::Moderate)
    };

    Decision {
        direction,
        confidence,
        label: StrategyLabel::new(direction, tier),
    }
}
