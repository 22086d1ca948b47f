//! DC motor drivers

pub mod hbridge;

pub use hbridge::HBridgeMotor;

use sickle_core::traits::{DutyPercent, MotorDirection};

/// Motor driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// PWM channel rejected the duty cycle
    Pwm,
}

/// Bidirectional DC motor
pub trait DcMotor {
    /// Drive in `direction` at `duty`; `MotorDirection::Stop` coasts
    fn drive(&mut self, direction: MotorDirection, duty: DutyPercent) -> Result<(), MotorError>;

    /// Short brake
    fn brake(&mut self) -> Result<(), MotorError>;

    /// Let the motor freewheel
    fn coast(&mut self) -> Result<(), MotorError> {
        self.drive(MotorDirection::Stop, DutyPercent::ZERO)
    }
}
