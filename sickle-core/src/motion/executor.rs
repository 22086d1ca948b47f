//! Timed motion executor
//!
//! Drives one motor for a bounded time while polling the emergency stop
//! every `poll_ms`. A trip hands off to the safety controller's full stop,
//! so no motor stays energized on any exit path.
//!
//! Stop latency is at most one polling increment: the input is checked
//! before every increment of the wait, including the first.

use super::step::{MotionStep, StepOutcome};
use crate::safety;
use crate::status::StatusMessage;
use crate::traits::{emergency_stop_asserted, report, MotorDirection, MotorId, ToolHardware};

/// Default e-stop polling increment
pub const DEFAULT_POLL_MS: u32 = 10;

/// Runs timed motion steps against the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionExecutor {
    poll_ms: u32,
}

impl Default for MotionExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_MS)
    }
}

impl MotionExecutor {
    /// Create an executor polling every `poll_ms` (minimum 1)
    pub fn new(poll_ms: u32) -> Self {
        Self {
            poll_ms: poll_ms.max(1),
        }
    }

    /// Get the polling increment
    pub fn poll_ms(&self) -> u32 {
        self.poll_ms
    }

    /// Run a motor for a duration
    ///
    /// `duty_percent` is normalized here: anything above 100 is commanded
    /// as exactly 100.
    pub fn run_for<H: ToolHardware + ?Sized>(
        &self,
        hw: &mut H,
        motor: MotorId,
        direction: MotorDirection,
        duty_percent: u8,
        duration_ms: u32,
    ) -> StepOutcome {
        self.run(hw, &MotionStep::new(motor, direction, duty_percent, duration_ms))
    }

    /// Run one motion step
    pub fn run<H: ToolHardware + ?Sized>(&self, hw: &mut H, step: &MotionStep) -> StepOutcome {
        log_debug!(
            "Step: motor={:?} dir={:?} duty={} for {}ms",
            step.motor,
            step.direction,
            step.duty.get(),
            step.duration_ms
        );

        if let Err(e) = hw.motor_set(step.motor, step.direction, step.duty) {
            // Motion state is unknown; stop everything
            log_warn!("Motor command failed: {:?}", e);
            return self.trip(hw);
        }

        let mut remaining = step.duration_ms;
        while remaining > 0 {
            if emergency_stop_asserted(hw) {
                return self.trip(hw);
            }
            let slice = remaining.min(self.poll_ms);
            hw.delay_ms(slice);
            remaining -= slice;
        }

        if let Err(e) = hw.motor_brake(step.motor) {
            // Fall back to braking everything
            log_warn!("Brake failed: {:?}", e);
            safety::brake_all(hw);
        }

        StepOutcome::Completed
    }

    fn trip<H: ToolHardware + ?Sized>(&self, hw: &mut H) -> StepOutcome {
        safety::emergency_stop(hw);
        report(hw, StatusMessage::StepEmergencyStop.as_str());
        log_warn!("Emergency stop during motion step");
        StepOutcome::Tripped
    }
}
