//! Signal evaluation: strategy components, composite score, decision.

pub mod decision;
pub mod engine;
pub mod scoring;

pub use decision::*;
pub use engine::SignalScorer;
pub use scoring::*;
