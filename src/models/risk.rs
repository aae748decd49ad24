use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Long,
    Short,
}

/// Recommended position for one trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSizing {
    /// Share of the account put at risk, in `[0, 0.15]`
    pub capital_fraction: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub quantity: u64,
    pub risk_amount: f64,
}

impl PositionSizing {
    /// No position: nothing at risk, stop and target pinned to the entry
    pub fn flat(entry_price: f64) -> Self {
        Self {
            capital_fraction: 0.0,
            stop_loss: entry_price,
            take_profit: entry_price,
            quantity: 0,
            risk_amount: 0.0,
        }
    }
}
