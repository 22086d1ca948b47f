//! Safety controller
//!
//! Brings the tool to a braked, de-energized state.

pub mod controller;

pub use controller::{brake_all, emergency_stop};
