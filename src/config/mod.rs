//! Environment-driven configuration.
//!
//! Every setting has a typed default so the engine runs without any
//! environment at all; `.env` files are loaded by the binary via `dotenvy`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::risk::{CircuitBreakerConfig, RiskParams};

const DEFAULT_QUESTDB_URL: &str = "host=localhost port=8812 user=admin password=quest dbname=qdb";
const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Deployment environment name (`production`, `prod`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

pub fn get_port() -> u16 {
    env_or("PORT", 8080)
}

pub fn get_questdb_url() -> String {
    env::var("QUESTDB_URL").unwrap_or_else(|_| DEFAULT_QUESTDB_URL.to_string())
}

pub fn get_market_data_base_url() -> String {
    env::var("MARKET_DATA_BASE_URL").unwrap_or_else(|_| DEFAULT_MARKET_DATA_BASE_URL.to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key = key, value = %raw, "Ignoring unparsable config value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Settings for one signal service instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on a single market data fetch
    pub fetch_timeout: Duration,
    pub risk: RiskParams,
    pub breaker: CircuitBreakerConfig,
    /// Strikes are quoted in multiples of this step
    pub strike_step: f64,
    /// Premium assumed when projecting the payoff of the suggested option
    pub option_premium: f64,
    /// Volatility ratio handed to the stop multiplier; 1.0 keeps stops at 2x ATR
    pub stop_volatility_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            risk: RiskParams::default(),
            breaker: CircuitBreakerConfig::default(),
            strike_step: 50.0,
            option_premium: 100.0,
            stop_volatility_ratio: 1.0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fetch_timeout: Duration::from_secs(env_or(
                "FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )),
            risk: RiskParams {
                account_balance: env_or("ACCOUNT_BALANCE", defaults.risk.account_balance),
                win_rate: env_or("WIN_RATE", defaults.risk.win_rate),
                avg_win: env_or("AVG_WIN", defaults.risk.avg_win),
                avg_loss: env_or("AVG_LOSS", defaults.risk.avg_loss),
            },
            breaker: CircuitBreakerConfig {
                max_daily_loss_pct: env_or("MAX_DAILY_LOSS_PCT", defaults.breaker.max_daily_loss_pct),
                max_drawdown_pct: env_or("MAX_DRAWDOWN_PCT", defaults.breaker.max_drawdown_pct),
                consecutive_loss_limit: env_or(
                    "CONSECUTIVE_LOSS_LIMIT",
                    defaults.breaker.consecutive_loss_limit,
                ),
            },
            strike_step: env_or("STRIKE_STEP", defaults.strike_step),
            option_premium: env_or("OPTION_PREMIUM", defaults.option_premium),
            stop_volatility_ratio: env_or("STOP_VOLATILITY_RATIO", defaults.stop_volatility_ratio),
        }
    }
}
