//! One signal evaluation, end to end.
//!
//! `analyze` is the pure part: normalize, indicators, score, payoff, sizing.
//! `SignalService` wraps it with the symbol check, the bounded fetch, the
//! circuit breaker gate and the signal log.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::db::{SignalFilter, SignalStore};
use crate::error::EngineError;
use crate::indicators::IndicatorEngine;
use crate::metrics::Metrics;
use crate::models::{
    Direction, IndicatorFrame, OptionType, PayoffPoint, PositionSizing, PredictionResult, RawBar,
    SignalLogRecord, SignalScore, TradeSide,
};
use crate::normalizer::{normalize, NormalizeError};
use crate::options::{nearest_strike, payoff_graph};
use crate::risk::{BreakerHandle, CircuitBreaker, CircuitBreakerState, RiskError, RiskSizer};
use crate::services::{MarketDataProvider, ProviderError};
use crate::signals::SignalScorer;

static SYMBOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9.\-]{1,20}$").expect("symbol pattern is a valid regex"));

/// Uppercase and check a caller-supplied symbol; nothing else is stripped
pub fn validate_symbol(raw: &str) -> Result<String, EngineError> {
    let symbol = raw.to_uppercase();
    if SYMBOL_PATTERN.is_match(&symbol) {
        Ok(symbol)
    } else {
        Err(EngineError::InvalidSymbolFormat(raw.to_string()))
    }
}

/// Result of the pure analysis stage
#[derive(Debug, Clone)]
pub struct Analysis {
    pub frame: IndicatorFrame,
    pub score: SignalScore,
    pub prediction: PredictionResult,
    pub strike: Option<f64>,
    pub option_type: Option<OptionType>,
    pub payoff_graph: Vec<PayoffPoint>,
    pub risk: PositionSizing,
}

/// Deterministic analysis of one raw bar sequence
pub fn analyze(raw: &[RawBar], sizer: &RiskSizer, config: &EngineConfig) -> Result<Analysis, NormalizeError> {
    let bars = normalize(raw)?;
    let frame = IndicatorEngine::compute(&bars);
    let (score, prediction) = SignalScorer::evaluate(&bars, &frame).ok_or(NormalizeError::Empty)?;

    let price = prediction.current_price;
    // A contract is only named together with a listed strike
    let contract = prediction
        .strategy_label
        .option_type()
        .and_then(|kind| nearest_strike(price, config.strike_step).map(|strike| (kind, strike)));

    let payoff = match contract {
        Some((kind, strike)) => payoff_graph(kind, strike, config.option_premium).unwrap_or_else(|e| {
            warn!(error = %e, strike = strike, "Skipping payoff projection");
            Vec::new()
        }),
        None => Vec::new(),
    };

    let side = match prediction.prediction {
        Direction::Bullish => Some(TradeSide::Long),
        Direction::Bearish => Some(TradeSide::Short),
        Direction::Neutral => None,
    };
    let risk = match side {
        Some(side) => {
            let atr = frame.latest().and_then(|s| s.atr).unwrap_or(0.0);
            sizer.size(price, atr, side, prediction.confidence, config.stop_volatility_ratio)
        }
        None => PositionSizing::flat(price),
    };

    Ok(Analysis {
        frame,
        score,
        prediction,
        strike: contract.map(|(_, strike)| strike),
        option_type: contract.map(|(kind, _)| kind),
        payoff_graph: payoff,
        risk,
    })
}

/// Response body of one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub prediction: PredictionResult,
    pub strike: Option<f64>,
    pub option_type: Option<OptionType>,
    pub payoff_graph: Vec<PayoffPoint>,
    pub risk: PositionSizing,
    /// Sizing was withheld because the circuit breaker is tripped
    pub risk_gated: bool,
    pub breaker_reason: Option<String>,
}

pub struct SignalService {
    provider: Arc<dyn MarketDataProvider>,
    store: Arc<dyn SignalStore>,
    breaker: BreakerHandle,
    sizer: RiskSizer,
    config: EngineConfig,
    metrics: Arc<Metrics>,
}

impl SignalService {
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn SignalStore>,
        metrics: Arc<Metrics>,
    ) -> Result<Self, RiskError> {
        let sizer = RiskSizer::new(config.risk)?;
        let breaker = BreakerHandle::new(CircuitBreaker::new(config.breaker));
        Ok(Self {
            provider,
            store,
            breaker,
            sizer,
            config,
            metrics,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn breaker(&self) -> &BreakerHandle {
        &self.breaker
    }

    pub async fn evaluate(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
        user_id: Option<&str>,
    ) -> Result<Evaluation, EngineError> {
        let result = self.run_evaluation(symbol, period, interval, user_id).await;
        match &result {
            Ok(evaluation) => self.metrics.record_evaluation(evaluation.prediction.prediction),
            Err(e) if e.is_validation() => {}
            Err(_) => self.metrics.signal_evaluation_failures_total.inc(),
        }
        result
    }

    async fn run_evaluation(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
        user_id: Option<&str>,
    ) -> Result<Evaluation, EngineError> {
        let symbol = validate_symbol(symbol)?;

        let raw = self.fetch(&symbol, period, interval).await?;
        debug!(symbol = %symbol, bars = raw.len(), "Fetched market data");

        let analysis = analyze(&raw, &self.sizer, &self.config)
            .map_err(|e| EngineError::data_unavailable(&symbol, e))?;

        let breaker = self.breaker.snapshot().await;
        let (risk, risk_gated) = if breaker.is_triggered {
            (PositionSizing::flat(analysis.prediction.current_price), true)
        } else {
            (analysis.risk, false)
        };

        let timestamp = Utc::now();
        let record = SignalLogRecord {
            symbol: symbol.clone(),
            timestamp,
            current_price: analysis.prediction.current_price,
            predicted_direction: analysis.prediction.prediction,
            confidence_score: analysis.prediction.confidence,
            suggested_strategy: analysis.prediction.strategy_label.to_string(),
            user_id: user_id.map(str::to_string),
        };
        self.store.store(&record).await?;

        info!(
            symbol = %symbol,
            prediction = %analysis.prediction.prediction,
            confidence = analysis.prediction.confidence,
            score = analysis.score.total,
            risk_gated = risk_gated,
            "Signal evaluated"
        );

        Ok(Evaluation {
            symbol,
            timestamp,
            prediction: analysis.prediction,
            strike: analysis.strike,
            option_type: analysis.option_type,
            payoff_graph: analysis.payoff_graph,
            risk,
            risk_gated,
            breaker_reason: breaker.trigger_reason.filter(|_| risk_gated),
        })
    }

    async fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<Vec<RawBar>, EngineError> {
        let fetch = self.provider.fetch_bars(symbol, period, interval);
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(bars)) => Ok(bars),
            Ok(Err(ProviderError::InvalidParameter { name, value })) => {
                Err(EngineError::InvalidParameter { name, value })
            }
            Ok(Err(e)) => Err(EngineError::data_unavailable(symbol, e)),
            Err(_) => Err(EngineError::data_unavailable(
                symbol,
                format!("fetch timed out after {:?}", self.config.fetch_timeout),
            )),
        }
    }

    /// Feed a realized PnL event to the breaker
    pub async fn record_pnl(&self, pnl: f64, current_equity: f64) -> CircuitBreakerState {
        let (state, tripped) = self.breaker.update_pnl(pnl, current_equity).await;
        if tripped {
            self.metrics.circuit_breaker_trips_total.inc();
        }
        state
    }

    pub async fn reset_breaker(&self) -> CircuitBreakerState {
        self.breaker.reset().await
    }

    pub async fn recent_signals(
        &self,
        filter: &SignalFilter,
        limit: usize,
    ) -> Result<Vec<SignalLogRecord>, EngineError> {
        Ok(self.store.recent(filter, limit).await?)
    }
}
