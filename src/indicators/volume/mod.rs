//! Volume indicators: volume profile

pub mod volume_profile;

pub use volume_profile::*;
