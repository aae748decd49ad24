//! Core application primitives (pipeline, HTTP server)

pub mod http;
pub mod pipeline;

pub use http::*;
pub use pipeline::*;
