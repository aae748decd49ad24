//! Signal scorer: composite score and prediction for the latest bar.

use tracing::debug;

use crate::models::{IndicatorFrame, PredictionResult, PriceBar, SignalScore};
use crate::signals::decision::decide;
use crate::signals::scoring::{
    mean_reversion_component, momentum_component, scalp_component, trend_component, ScoringInput,
};

pub const SCALP_WEIGHT: f64 = 0.5;
pub const NO_SIGNAL_REASONING: &str = "No dominant signals detected.";

pub struct SignalScorer;

impl SignalScorer {
    /// Combine the strategy components.
    ///
    /// total = momentum + mean reversion + trend + 0.5 * scalp.
    /// Reasons keep evaluation order: scalp, momentum, mean reversion, trend.
    pub fn score(input: &ScoringInput) -> SignalScore {
        let scalp = scalp_component(input);
        let momentum = momentum_component(input);
        let mean_reversion = mean_reversion_component(input);
        let trend = trend_component(input);

        let total =
            momentum.score + mean_reversion.score + trend.score + scalp.score * SCALP_WEIGHT;

        let reasons = [scalp.reasons, momentum.reasons, mean_reversion.reasons, trend.reasons].concat();

        SignalScore {
            scalp_component: scalp.score,
            momentum_component: momentum.score,
            mean_reversion_component: mean_reversion.score,
            trend_component: trend.score,
            total,
            reasons,
        }
    }

    /// Score the latest bar and map it to a prediction; `None` without bars
    pub fn evaluate(bars: &[PriceBar], frame: &IndicatorFrame) -> Option<(SignalScore, PredictionResult)> {
        let input = ScoringInput::from_frame(bars, frame)?;
        let score = Self::score(&input);
        let decision = decide(score.total);

        debug!(
            total = score.total,
            scalp = score.scalp_component,
            momentum = score.momentum_component,
            mean_reversion = score.mean_reversion_component,
            trend = score.trend_component,
            direction = %decision.direction,
            "SignalScorer: scored latest bar"
        );

        let prediction = PredictionResult {
            prediction: decision.direction,
            confidence: decision.confidence,
            strategy_label: decision.label,
            current_price: input.price,
            rsi: input.current.rsi,
            macd: input.current.macd,
            sma50: input.current.sma50,
            poc: input.poc,
            reasoning: reasoning(&score.reasons),
        };

        Some((score, prediction))
    }
}

/// Reasons joined with " | ", or a fixed sentence when nothing fired
pub fn reasoning(reasons: &[String]) -> String {
    if reasons.is_empty() {
        NO_SIGNAL_REASONING.to_string()
    } else {
        reasons.join(" | ")
    }
}
