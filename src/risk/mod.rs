//! Risk management.
//!
//! - Position sizing (fractional Kelly, ATR stops)
//! - Circuit breaker (daily loss, drawdown, losing streak)

pub mod circuit_breaker;
pub mod sizing;

pub use circuit_breaker::{BreakerHandle, CircuitBreaker, CircuitBreakerConfig, CircuitBreakerState};
pub use sizing::{RiskError, RiskParams, RiskSizer};
