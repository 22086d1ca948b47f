//! Top-level control loop
//!
//! Arbitrates start requests against the emergency stop.

pub mod controller;
pub mod edge;

pub use controller::{Controller, TickOutcome};
pub use edge::EdgeDetector;
