//! Events that trigger state transitions

use crate::scheduler::CycleOutcome;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Start input went from released to asserted
    StartEdge,
    /// Emergency stop input observed asserted
    EmergencyStopAsserted,
    /// Emergency stop input observed released after a hold
    EmergencyStopReleased,
    /// Harvest cycle returned
    CycleFinished(CycleOutcome),
}

impl Event {
    /// Check if this event comes from the safety input
    pub fn is_safety_event(&self) -> bool {
        matches!(
            self,
            Event::EmergencyStopAsserted | Event::EmergencyStopReleased
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safety_events() {
        assert!(Event::EmergencyStopAsserted.is_safety_event());
        assert!(Event::EmergencyStopReleased.is_safety_event());
        assert!(!Event::StartEdge.is_safety_event());
        assert!(!Event::CycleFinished(CycleOutcome::Completed).is_safety_event());
    }
}
