//! Harvest cycle definition
//!
//! The cycle is a fixed script of five motions. Durations, duties and
//! polarity come from [`ToolConfig`]; the order does not.

use crate::config::ToolConfig;
use crate::motion::MotionStep;
use crate::traits::MotorId;

/// Number of steps in a harvest cycle
pub const CYCLE_STEPS: usize = 5;

/// Named step of the harvest cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CyclePhase {
    /// Make sure the gripper is fully open
    OpenGripper,
    /// Close the gripper on the stem
    Grip,
    /// Travel down; the cut happens mechanically at the bottom
    Lower,
    /// Retract
    Raise,
    /// Open the gripper to drop the cut vegetable
    Release,
}

/// One scripted step with its trailing settle delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleStep {
    pub phase: CyclePhase,
    pub motion: MotionStep,
    /// Pure wait after the motion (0 = none)
    pub settle_ms: u32,
}

/// Complete harvest cycle script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HarvestCycle {
    steps: [CycleStep; CYCLE_STEPS],
}

impl HarvestCycle {
    /// Build the cycle script from a tool configuration
    pub fn from_config(config: &ToolConfig) -> Self {
        let t = &config.timing;
        let d = &config.directions;
        let gripper = config.duty.gripper.get();
        let vertical = config.duty.vertical.get();

        let step = |phase, motor, direction, duty, duration_ms, settle_ms| CycleStep {
            phase,
            motion: MotionStep::new(motor, direction, duty, duration_ms),
            settle_ms,
        };

        Self {
            steps: [
                step(
                    CyclePhase::OpenGripper,
                    MotorId::Gripper,
                    d.gripper_open,
                    gripper,
                    t.open_gripper_ms,
                    t.settle_ms,
                ),
                step(
                    CyclePhase::Grip,
                    MotorId::Gripper,
                    d.gripper_close,
                    gripper,
                    t.close_gripper_ms,
                    t.settle_ms,
                ),
                step(
                    CyclePhase::Lower,
                    MotorId::Vertical,
                    d.vertical_down,
                    vertical,
                    t.move_down_ms,
                    t.settle_ms,
                ),
                step(
                    CyclePhase::Raise,
                    MotorId::Vertical,
                    d.vertical_up,
                    vertical,
                    t.move_up_ms,
                    t.settle_ms,
                ),
                // No settle after the last step
                step(
                    CyclePhase::Release,
                    MotorId::Gripper,
                    d.gripper_open,
                    gripper,
                    t.open_gripper_ms,
                    0,
                ),
            ],
        }
    }

    /// Get the scripted steps in execution order
    pub fn steps(&self) -> &[CycleStep] {
        &self.steps
    }

    /// Total time of an uninterrupted cycle (ms)
    pub fn nominal_duration_ms(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| s.motion.duration_ms.saturating_add(s.settle_ms))
            .fold(0u32, u32::saturating_add)
    }
}

impl Default for HarvestCycle {
    fn default() -> Self {
        Self::from_config(&ToolConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MotorDirection;

    #[test]
    fn test_default_script() {
        let cycle = HarvestCycle::default();
        let phases: heapless::Vec<CyclePhase, CYCLE_STEPS> =
            cycle.steps().iter().map(|s| s.phase).collect();
        assert_eq!(
            phases.as_slice(),
            &[
                CyclePhase::OpenGripper,
                CyclePhase::Grip,
                CyclePhase::Lower,
                CyclePhase::Raise,
                CyclePhase::Release,
            ]
        );

        let lower = &cycle.steps()[2].motion;
        assert_eq!(lower.motor, MotorId::Vertical);
        assert_eq!(lower.direction, MotorDirection::Forward);
        assert_eq!(lower.duty.get(), 70);
        assert_eq!(lower.duration_ms, 1200);
    }

    #[test]
    fn test_settle_after_all_but_last() {
        let cycle = HarvestCycle::default();
        let settles: heapless::Vec<u32, CYCLE_STEPS> =
            cycle.steps().iter().map(|s| s.settle_ms).collect();
        assert_eq!(settles.as_slice(), &[150, 150, 150, 150, 0]);
    }

    #[test]
    fn test_nominal_duration() {
        // 800 + 900 + 1200 + 900 + 800 motion, 4 x 150 settle
        assert_eq!(HarvestCycle::default().nominal_duration_ms(), 5200);
    }

    #[test]
    fn test_direction_map_applied() {
        let mut config = ToolConfig::default();
        config.directions.gripper_open = MotorDirection::Reverse;
        config.directions.gripper_close = MotorDirection::Forward;

        let cycle = HarvestCycle::from_config(&config);
        assert_eq!(cycle.steps()[0].motion.direction, MotorDirection::Reverse);
        assert_eq!(cycle.steps()[1].motion.direction, MotorDirection::Forward);
        assert_eq!(cycle.steps()[4].motion.direction, MotorDirection::Reverse);
    }
}
