//! Timed motion steps

use crate::traits::{DutyPercent, MotorDirection, MotorId};

/// One commanded motion with a hard time bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionStep {
    /// Motor to drive
    pub motor: MotorId,
    /// Drive polarity
    pub direction: MotorDirection,
    /// Drive strength
    pub duty: DutyPercent,
    /// How long to drive before braking
    pub duration_ms: u32,
}

impl MotionStep {
    /// Create a step, clamping `duty_percent` to 100
    pub const fn new(
        motor: MotorId,
        direction: MotorDirection,
        duty_percent: u8,
        duration_ms: u32,
    ) -> Self {
        Self {
            motor,
            direction,
            duty: DutyPercent::new(duty_percent),
            duration_ms,
        }
    }
}

/// How a motion step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Full duration elapsed and the motor was braked
    Completed,
    /// Emergency stop cut the step short; every motor was braked
    Tripped,
}

impl StepOutcome {
    /// Check if the emergency stop ended this step
    pub fn is_tripped(self) -> bool {
        self == StepOutcome::Tripped
    }
}
