//! Option payoff projection

pub mod payoff;

pub use payoff::*;
