//! Tool hardware contract
//!
//! The control logic consumes this trait and never implements it. Board
//! crates provide the real implementation; [`crate::mock`] provides a
//! recording double for tests.

use super::motor::{DutyPercent, MotorDirection, MotorId};

/// Errors reported by the hardware layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    /// Motor output could not be driven
    Motor(MotorId),
    /// Digital input could not be read
    Input,
    /// Status indicator could not be driven
    Indicator,
    /// Status line could not be written
    Status,
}

/// Hardware access used by the controller
///
/// All operations are blocking. Duty values are already clamped by the
/// caller before [`ToolHardware::motor_set`] is invoked.
pub trait ToolHardware {
    /// One-time setup, called once before the control loop starts
    fn init(&mut self) -> Result<(), HardwareError>;

    /// Drive a motor in a direction at a duty
    fn motor_set(
        &mut self,
        motor: MotorId,
        direction: MotorDirection,
        duty: DutyPercent,
    ) -> Result<(), HardwareError>;

    /// Actively brake a motor
    fn motor_brake(&mut self, motor: MotorId) -> Result<(), HardwareError>;

    /// Read an encoder position
    ///
    /// Reserved for feedback control; the cycle does not use it. Boards
    /// without encoders keep the default.
    fn encoder_get(&mut self, _motor: MotorId) -> Result<u32, HardwareError> {
        Ok(0)
    }

    /// Blocking wait
    fn delay_ms(&mut self, ms: u32);

    /// Latest sample of the start input (true = asserted)
    fn read_start_signal(&mut self) -> Result<bool, HardwareError>;

    /// Latest sample of the emergency-stop input (true = asserted)
    fn read_emergency_stop_signal(&mut self) -> Result<bool, HardwareError>;

    /// Drive the status indicator
    fn set_status_indicator(&mut self, on: bool) -> Result<(), HardwareError>;

    /// Emit a human-readable status line
    fn send_status(&mut self, text: &str) -> Result<(), HardwareError>;
}

/// Sample the emergency-stop input, treating a failed read as asserted
pub fn emergency_stop_asserted<H: ToolHardware + ?Sized>(hw: &mut H) -> bool {
    match hw.read_emergency_stop_signal() {
        Ok(asserted) => asserted,
        Err(e) => {
            log_warn!("E-stop read failed ({:?}), treating as asserted", e);
            true
        }
    }
}

/// Sample the start input, treating a failed read as not asserted
pub fn start_asserted<H: ToolHardware + ?Sized>(hw: &mut H) -> bool {
    match hw.read_start_signal() {
        Ok(asserted) => asserted,
        Err(e) => {
            log_warn!("Start read failed ({:?}), ignoring", e);
            false
        }
    }
}

/// Emit a status line; failures are logged and dropped
pub fn report<H: ToolHardware + ?Sized>(hw: &mut H, text: &str) {
    if let Err(e) = hw.send_status(text) {
        log_warn!("Status write failed: {:?}", e);
    }
}

/// Drive the indicator; failures are logged and dropped
pub fn indicate<H: ToolHardware + ?Sized>(hw: &mut H, on: bool) {
    if let Err(e) = hw.set_status_indicator(on) {
        log_warn!("Indicator write failed: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Command, MockHardware};

    #[test]
    fn test_failed_estop_read_is_asserted() {
        let mut hw = MockHardware::new();
        hw.fail_estop_reads(true);
        assert!(emergency_stop_asserted(&mut hw));
    }

    #[test]
    fn test_failed_start_read_is_released() {
        let mut hw = MockHardware::new();
        hw.script_start(&[true]);
        hw.fail_start_reads(true);
        assert!(!start_asserted(&mut hw));
    }

    #[test]
    fn test_encoder_default() {
        let mut hw = MockHardware::new();
        assert_eq!(hw.encoder_get(MotorId::Gripper), Ok(0));
    }

    #[test]
    fn test_report_swallows_errors() {
        let mut hw = MockHardware::new();
        hw.fail_status(true);
        report(&mut hw, "ignored\n");
        indicate(&mut hw, true);
        assert_eq!(hw.records().len(), 1);
        assert_eq!(hw.records()[0].command, Command::Indicator(true));
    }
}
