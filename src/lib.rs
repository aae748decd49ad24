//! Strikewise: rule-based directional signals, option payoff projection and
//! position risk control over historical price bars.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod options;
pub mod risk;
pub mod services;
pub mod signals;
