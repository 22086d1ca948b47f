//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and
//! board-specific implementations.

pub mod hardware;
pub mod motor;

pub use hardware::{
    emergency_stop_asserted, indicate, report, start_asserted, HardwareError, ToolHardware,
};
pub use motor::{DutyPercent, MotorDirection, MotorId};
