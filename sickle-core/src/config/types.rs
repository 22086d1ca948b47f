//! Configuration type definitions
//!
//! These types hold the per-tool tuning values. Defaults match the
//! prototype tool; boards override them from `tool.toml` at build time.

use crate::traits::{DutyPercent, MotorDirection};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step and delay durations (all in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Time to fully open the gripper
    pub open_gripper_ms: u32,
    /// Time to fully close the gripper on the stem
    pub close_gripper_ms: u32,
    /// Time to travel down to the cutting height
    pub move_down_ms: u32,
    /// Time to retract
    pub move_up_ms: u32,
    /// Pause after each motion so the mechanism stops oscillating
    pub settle_ms: u32,
    /// Pause after a cycle before start is polled again
    pub inter_cycle_ms: u32,
    /// E-stop polling increment inside a motion step
    ///
    /// Upper bound on stop latency during motion.
    pub step_poll_ms: u32,
    /// Main loop polling tick
    pub loop_tick_ms: u32,
    /// Polling interval while holding in emergency stop
    pub hold_poll_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            open_gripper_ms: 800,
            close_gripper_ms: 900,
            move_down_ms: 1200,
            move_up_ms: 900,
            settle_ms: 150,
            inter_cycle_ms: 250,
            step_poll_ms: 10,
            loop_tick_ms: 10,
            hold_poll_ms: 10,
        }
    }
}

/// Drive strength per actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DutyConfig {
    /// Gripper motor duty
    pub gripper: DutyPercent,
    /// Vertical actuator duty
    pub vertical: DutyPercent,
}

impl Default for DutyConfig {
    fn default() -> Self {
        Self {
            gripper: DutyPercent::new(60),
            vertical: DutyPercent::new(70),
        }
    }
}

/// Semantic direction to drive polarity
///
/// Swap entries here when a motor is wired with flipped polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DirectionMap {
    pub gripper_open: MotorDirection,
    pub gripper_close: MotorDirection,
    pub vertical_down: MotorDirection,
    pub vertical_up: MotorDirection,
}

impl Default for DirectionMap {
    fn default() -> Self {
        Self {
            gripper_open: MotorDirection::Forward,
            gripper_close: MotorDirection::Reverse,
            vertical_down: MotorDirection::Forward,
            vertical_up: MotorDirection::Reverse,
        }
    }
}

/// Cycle behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CycleConfig {
    /// Stop issuing steps once any step is cut short by the emergency stop
    ///
    /// When false the remaining steps are still issued (bench behavior
    /// of the first prototype).
    pub abort_on_trip: bool,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            abort_on_trip: true,
        }
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolConfig {
    pub timing: TimingConfig,
    pub duty: DutyConfig,
    pub directions: DirectionMap,
    pub cycle: CycleConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A polling interval or tick is zero
    ZeroPollInterval,
    /// A semantic direction maps to `Stop`
    StopDirection,
    /// Both semantic directions of one actuator map to the same polarity
    AmbiguousDirection,
}

impl ToolConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        if t.step_poll_ms == 0 || t.loop_tick_ms == 0 || t.hold_poll_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        let d = &self.directions;
        let all = [d.gripper_open, d.gripper_close, d.vertical_down, d.vertical_up];
        if all.iter().any(|dir| !dir.is_driving()) {
            return Err(ConfigError::StopDirection);
        }
        if d.gripper_open == d.gripper_close || d.vertical_down == d.vertical_up {
            return Err(ConfigError::AmbiguousDirection);
        }

        Ok(())
    }

    /// Configuration with every duration scaled down for quick bench runs
    ///
    /// Durations are divided by `divisor` (minimum 1 ms for polling).
    pub fn scaled(&self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        let t = &self.timing;
        let mut scaled = *self;
        scaled.timing = TimingConfig {
            open_gripper_ms: t.open_gripper_ms / divisor,
            close_gripper_ms: t.close_gripper_ms / divisor,
            move_down_ms: t.move_down_ms / divisor,
            move_up_ms: t.move_up_ms / divisor,
            settle_ms: t.settle_ms / divisor,
            inter_cycle_ms: t.inter_cycle_ms / divisor,
            step_poll_ms: (t.step_poll_ms / divisor).max(1),
            loop_tick_ms: (t.loop_tick_ms / divisor).max(1),
            hold_poll_ms: (t.hold_poll_ms / divisor).max(1),
        };
        scaled
    }
}
