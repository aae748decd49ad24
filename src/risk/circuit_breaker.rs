//! Portfolio circuit breaker.
//!
//! ARMED -> TRIPPED on the first breached limit after a PnL update. A tripped
//! breaker stays tripped until `reset`, which also starts a new session's
//! daily PnL and loss streak while keeping the equity history.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Daily loss limit as a fraction of peak equity
    pub max_daily_loss_pct: f64,
    /// Drawdown limit from peak equity
    pub max_drawdown_pct: f64,
    pub consecutive_loss_limit: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_daily_loss_pct: 0.03,
            max_drawdown_pct: 0.15,
            consecutive_loss_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerState {
    pub is_triggered: bool,
    pub trigger_reason: Option<String>,
    /// Time of the most recent trip; kept across resets
    pub trigger_time: Option<DateTime<Utc>>,
    pub daily_pnl: f64,
    pub peak_equity: f64,
    pub current_equity: f64,
    pub consecutive_losses: u32,
}

#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: CircuitBreakerState,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: CircuitBreakerState::default(),
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    pub fn state(&self) -> &CircuitBreakerState {
        &self.state
    }

    pub fn is_triggered(&self) -> bool {
        self.state.is_triggered
    }

    /// Record a realized PnL event. Returns true if this event tripped the breaker.
    pub fn update_pnl(&mut self, pnl: f64, current_equity: f64) -> bool {
        self.update_pnl_at(pnl, current_equity, Utc::now())
    }

    pub fn update_pnl_at(&mut self, pnl: f64, current_equity: f64, now: DateTime<Utc>) -> bool {
        let state = &mut self.state;
        state.daily_pnl += pnl;
        state.current_equity = current_equity;
        state.peak_equity = state.peak_equity.max(current_equity);
        if pnl < 0.0 {
            state.consecutive_losses += 1;
        } else {
            state.consecutive_losses = 0;
        }

        if self.state.is_triggered {
            return false;
        }

        match self.breached_limit() {
            Some(reason) => {
                self.trip(reason, now);
                true
            }
            None => false,
        }
    }

    /// Daily PnL over peak equity; 0 without a positive peak
    pub fn daily_loss_ratio(&self) -> f64 {
        if self.state.peak_equity > 0.0 {
            self.state.daily_pnl / self.state.peak_equity
        } else {
            0.0
        }
    }

    /// Current equity's distance below peak, as a negative fraction
    pub fn drawdown_ratio(&self) -> f64 {
        if self.state.peak_equity > 0.0 {
            (self.state.current_equity - self.state.peak_equity) / self.state.peak_equity
        } else {
            0.0
        }
    }

    fn breached_limit(&self) -> Option<String> {
        let daily = self.daily_loss_ratio();
        if daily < -self.config.max_daily_loss_pct {
            return Some(format!("Daily Loss Limit Hit (-{:.2}%)", daily.abs() * 100.0));
        }

        let drawdown = self.drawdown_ratio();
        if drawdown < -self.config.max_drawdown_pct {
            return Some(format!("Max Drawdown Limit Hit (-{:.2}%)", drawdown.abs() * 100.0));
        }

        if self.state.consecutive_losses >= self.config.consecutive_loss_limit {
            return Some(format!(
                "Too many consecutive losses ({})",
                self.config.consecutive_loss_limit
            ));
        }

        None
    }

    fn trip(&mut self, reason: String, now: DateTime<Utc>) {
        error!(
            reason = %reason,
            daily_pnl = self.state.daily_pnl,
            peak_equity = self.state.peak_equity,
            current_equity = self.state.current_equity,
            consecutive_losses = self.state.consecutive_losses,
            "CIRCUIT BREAKER TRIGGERED: {}",
            reason
        );
        self.state.is_triggered = true;
        self.state.trigger_reason = Some(reason);
        self.state.trigger_time = Some(now);
    }

    /// Re-arm for a new session
    pub fn reset(&mut self) {
        self.state.is_triggered = false;
        self.state.trigger_reason = None;
        self.state.daily_pnl = 0.0;
        self.state.consecutive_losses = 0;
        info!(
            peak_equity = self.state.peak_equity,
            current_equity = self.state.current_equity,
            "Circuit breaker reset"
        );
    }
}

/// Shared, serialized access to the process-wide breaker.
///
/// Each operation holds the lock for its whole read-modify-check cycle.
#[derive(Debug, Clone)]
pub struct BreakerHandle {
    inner: Arc<Mutex<CircuitBreaker>>,
}

impl BreakerHandle {
    pub fn new(breaker: CircuitBreaker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(breaker)),
        }
    }

    /// Apply a PnL event; returns the resulting state and whether it tripped
    pub async fn update_pnl(&self, pnl: f64, current_equity: f64) -> (CircuitBreakerState, bool) {
        let mut breaker = self.inner.lock().await;
        let tripped = breaker.update_pnl(pnl, current_equity);
        (breaker.state().clone(), tripped)
    }

    pub async fn reset(&self) -> CircuitBreakerState {
        let mut breaker = self.inner.lock().await;
        breaker.reset();
        breaker.state().clone()
    }

    pub async fn snapshot(&self) -> CircuitBreakerState {
        self.inner.lock().await.state().clone()
    }

    pub async fn config(&self) -> CircuitBreakerConfig {
        *self.inner.lock().await.config()
    }
}
