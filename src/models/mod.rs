//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod option;
pub mod risk;
pub mod signal;

pub use bar::{PriceBar, RawBar};
pub use indicators::{IndicatorFrame, IndicatorSet, MacdPeriods, VolumeProfile};
pub use option::{OptionType, PayoffPoint};
pub use risk::{PositionSizing, TradeSide};
pub use signal::{
    ConfidenceTier, Direction, PredictionResult, SignalLogRecord, SignalScore, StrategyLabel,
};
