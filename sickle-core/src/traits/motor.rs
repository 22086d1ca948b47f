//! Motor identifiers, directions and duty
//!
//! These are the values exchanged with the hardware layer. Semantic
//! directions (open/close, up/down) are not defined here; see
//! [`crate::config::DirectionMap`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor identifier
///
/// Discriminants are stable and used for dispatch. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum MotorId {
    /// Opens and closes the gripper cage
    Gripper = 0,
    /// Moves the mechanism up and down
    Vertical = 1,
    /// Spare output, unused by the cycle but always braked on a full stop
    Aux = 2,
}

impl MotorId {
    /// Number of motor outputs
    pub const COUNT: usize = 3;

    /// Every motor, in discriminant order
    pub const ALL: [MotorId; Self::COUNT] = [MotorId::Gripper, MotorId::Vertical, MotorId::Aux];

    /// Index for per-motor tables
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Electrical drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum MotorDirection {
    /// No drive (coast)
    #[default]
    Stop = 0,
    /// Forward polarity
    Forward = 1,
    /// Reverse polarity
    Reverse = 2,
}

impl MotorDirection {
    /// Check if this direction energizes the motor
    pub fn is_driving(self) -> bool {
        self != MotorDirection::Stop
    }
}

/// Commanded drive strength as a percentage of full power
///
/// Construction clamps to 100. Values above 100 are never rejected,
/// so a bad constant can never fault a motion halfway through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct DutyPercent(u8);

impl DutyPercent {
    /// Full power
    pub const MAX: DutyPercent = DutyPercent(100);

    /// Zero drive
    pub const ZERO: DutyPercent = DutyPercent(0);

    /// Normalize a raw percentage, clamping anything above 100
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self::MAX
        } else {
            Self(percent)
        }
    }

    /// Get the percentage (always 0..=100)
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for DutyPercent {
    fn from(percent: u8) -> Self {
        Self::new(percent)
    }
}

impl From<DutyPercent> for u8 {
    fn from(duty: DutyPercent) -> Self {
        duty.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_motor_ids_are_stable() {
        assert_eq!(MotorId::Gripper as u8, 0);
        assert_eq!(MotorId::Vertical as u8, 1);
        assert_eq!(MotorId::Aux as u8, 2);
    }

    #[test]
    fn test_all_motors_in_order() {
        for (i, motor) in MotorId::ALL.iter().enumerate() {
            assert_eq!(motor.index(), i);
        }
    }

    #[test]
    fn test_direction_driving() {
        assert!(MotorDirection::Forward.is_driving());
        assert!(MotorDirection::Reverse.is_driving());
        assert!(!MotorDirection::Stop.is_driving());
    }

    #[test]
    fn test_duty_boundaries() {
        assert_eq!(DutyPercent::new(0).get(), 0);
        assert_eq!(DutyPercent::new(100).get(), 100);
        assert_eq!(DutyPercent::new(101).get(), 100);
        assert_eq!(DutyPercent::new(u8::MAX), DutyPercent::MAX);
    }

    proptest! {
        #[test]
        fn duty_above_100_clamps_to_100(raw in 101u8..=u8::MAX) {
            prop_assert_eq!(DutyPercent::new(raw).get(), 100);
        }

        #[test]
        fn duty_in_range_is_preserved(raw in 0u8..=100) {
            prop_assert_eq!(DutyPercent::from(raw).get(), raw);
        }
    }
}
