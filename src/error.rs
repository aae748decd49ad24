//! Request-level error taxonomy.
//!
//! Validation failures are user-facing; everything else is surfaced to
//! callers as an opaque failure and logged with full context at the boundary.

use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid stock symbol format: {0:?}")]
    InvalidSymbolFormat(String),

    #[error("Invalid {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Market data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("Signal store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// True for malformed caller input, where no computation was attempted
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidSymbolFormat(_) | EngineError::InvalidParameter { .. }
        )
    }

    pub(crate) fn data_unavailable(symbol: &str, reason: impl ToString) -> Self {
        EngineError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        }
    }
}
