//! H-bridge DC motor driver
//!
//! Drives a brushed DC motor through an H-bridge with two PWM inputs
//! (DRV8833/DRV8837 style).
//!
//! | IN1  | IN2  | Motor                |
//! |------|------|----------------------|
//! | 0    | 0    | Coast                |
//! | duty | 0    | Forward              |
//! | 0    | duty | Reverse              |
//! | 100% | 100% | Short brake          |

use embedded_hal::pwm::SetDutyCycle;
use sickle_core::traits::{DutyPercent, MotorDirection};

use super::{DcMotor, MotorError};

/// DC motor on a two-input H-bridge
pub struct HBridgeMotor<IN1, IN2> {
    in1: IN1,
    in2: IN2,
    direction: MotorDirection,
    duty: DutyPercent,
    braked: bool,
}

impl<IN1, IN2> HBridgeMotor<IN1, IN2>
where
    IN1: SetDutyCycle,
    IN2: SetDutyCycle,
{
    /// Create a new motor; both inputs are driven low (coast)
    pub fn new(in1: IN1, in2: IN2) -> Result<Self, MotorError> {
        let mut motor = Self {
            in1,
            in2,
            direction: MotorDirection::Stop,
            duty: DutyPercent::ZERO,
            braked: false,
        };
        motor.coast()?;
        Ok(motor)
    }

    /// Last commanded direction
    pub fn direction(&self) -> MotorDirection {
        self.direction
    }

    /// Last commanded duty
    pub fn duty(&self) -> DutyPercent {
        self.duty
    }

    /// Check if the last command was a brake
    pub fn is_braked(&self) -> bool {
        self.braked
    }

    fn set_inputs(&mut self, in1: u8, in2: u8) -> Result<(), MotorError> {
        self.in1
            .set_duty_cycle_percent(in1)
            .map_err(|_| MotorError::Pwm)?;
        self.in2
            .set_duty_cycle_percent(in2)
            .map_err(|_| MotorError::Pwm)
    }
}

impl<IN1, IN2> DcMotor for HBridgeMotor<IN1, IN2>
where
    IN1: SetDutyCycle,
    IN2: SetDutyCycle,
{
    fn drive(&mut self, direction: MotorDirection, duty: DutyPercent) -> Result<(), MotorError> {
        let pct = duty.get();
        // Release the active side first so both inputs are never driven
        // at partial duty together
        match direction {
            MotorDirection::Forward => {
                self.in2
                    .set_duty_cycle_fully_off()
                    .map_err(|_| MotorError::Pwm)?;
                self.in1
                    .set_duty_cycle_percent(pct)
                    .map_err(|_| MotorError::Pwm)?;
            }
            MotorDirection::Reverse => {
                self.in1
                    .set_duty_cycle_fully_off()
                    .map_err(|_| MotorError::Pwm)?;
                self.in2
                    .set_duty_cycle_percent(pct)
                    .map_err(|_| MotorError::Pwm)?;
            }
            MotorDirection::Stop => self.set_inputs(0, 0)?,
        }

        self.direction = direction;
        self.duty = if direction.is_driving() {
            duty
        } else {
            DutyPercent::ZERO
        };
        self.braked = false;
        Ok(())
    }

    fn brake(&mut self) -> Result<(), MotorError> {
        self.set_inputs(100, 100)?;
        self.direction = MotorDirection::Stop;
        self.duty = DutyPercent::ZERO;
        self.braked = true;
        Ok(())
    }
}
