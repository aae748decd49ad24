//! Technical indicators computed over a full bar history.
//!
//! Every function returns one value per input bar so results line up with
//! the bars they were derived from.

pub mod engine;
pub mod regime;

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use engine::IndicatorEngine;
pub use regime::{band_multiplier, select_macd_periods, volatility_ratio};
