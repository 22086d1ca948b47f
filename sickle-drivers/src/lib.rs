//! Hardware driver implementations
//!
//! Concrete implementations of the `sickle-core` hardware contract on top
//! of `embedded-hal` 1.0 and `embedded-io`:
//!
//! - H-bridge DC motor driver (two PWM inputs)
//! - Signal inputs and the status LED with active-low handling
//! - `BoardHardware`, the full tool board

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod motor;

pub use board::{BoardHardware, SignalInput, StatusLed};
pub use motor::{DcMotor, HBridgeMotor, MotorError};
