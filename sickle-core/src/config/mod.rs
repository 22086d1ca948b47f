//! Configuration types
//!
//! Board-agnostic tuning values for the harvest cycle and control loop.

pub mod types;

pub use types::*;
