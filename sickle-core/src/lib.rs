//! Board-agnostic control logic for the harvesting tool firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction contract (motors, signals, indicator, status)
//! - Timed motion executor with emergency-stop polling
//! - Harvest cycle definition and sequencer
//! - Safety controller (full stop)
//! - State machine and the main control loop
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod logging;

pub mod config;
pub mod control;
pub mod motion;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod status;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::ToolConfig;
pub use control::{Controller, TickOutcome};
pub use traits::{HardwareError, MotorDirection, MotorId, ToolHardware};
