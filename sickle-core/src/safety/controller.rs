//! Full-stop routines
//!
//! Both routines are idempotent and never fail: a hardware error on one
//! output is logged and the remaining outputs are still driven.

use crate::status::StatusMessage;
use crate::traits::{indicate, report, MotorId, ToolHardware};

/// Brake every motor, including reserved ones
///
/// Returns the number of motors that accepted the brake command.
pub fn brake_all<H: ToolHardware + ?Sized>(hw: &mut H) -> usize {
    let mut braked = 0;
    for motor in MotorId::ALL {
        match hw.motor_brake(motor) {
            Ok(()) => braked += 1,
            Err(e) => log_warn!("Brake {:?} failed: {:?}", motor, e),
        }
    }
    braked
}

/// Put the tool in its safe state
///
/// Brakes every motor, turns the status indicator off, and reports the
/// transition to the operator.
pub fn emergency_stop<H: ToolHardware + ?Sized>(hw: &mut H) {
    let braked = brake_all(hw);
    if braked < MotorId::COUNT {
        log_warn!("Only {} of {} motors braked", braked, MotorId::COUNT);
    }
    indicate(hw, false);
    report(hw, StatusMessage::EmergencyStop.as_str());
    log_warn!("EMERGENCY STOP");
}
