//! Utility types for `ilp-plugin`.
//!
//! - [`telemetry`] - `tracing` subscriber setup

pub mod telemetry;

pub use telemetry::*;
