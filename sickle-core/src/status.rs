//! Operator status lines
//!
//! Every line the controller sends through
//! [`ToolHardware::send_status`](crate::traits::ToolHardware::send_status).

use crate::scheduler::CyclePhase;

/// Status notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusMessage {
    /// Controller initialized and polling
    Ready,
    /// Harvest cycle started
    CycleStart,
    /// A cycle step is about to run
    Phase(CyclePhase),
    /// Harvest cycle ran every step
    CycleEnd,
    /// Harvest cycle stopped early by the emergency stop
    CycleAborted,
    /// Emergency stop observed during a motion step
    StepEmergencyStop,
    /// Safety controller brought the tool to a safe state
    EmergencyStop,
    /// Emergency stop input cleared
    EmergencyStopReleased,
}

impl StatusMessage {
    /// Text line sent to the operator
    pub fn as_str(self) -> &'static str {
        match self {
            StatusMessage::Ready => "[Tool] Harvester tool controller ready\n",
            StatusMessage::CycleStart => "[Tool] Harvest cycle START\n",
            StatusMessage::Phase(CyclePhase::OpenGripper) => "[Tool] Opening gripper\n",
            StatusMessage::Phase(CyclePhase::Grip) => "[Tool] Closing gripper\n",
            StatusMessage::Phase(CyclePhase::Lower) => "[Tool] Moving down for cut\n",
            StatusMessage::Phase(CyclePhase::Raise) => "[Tool] Moving up / retract\n",
            StatusMessage::Phase(CyclePhase::Release) => "[Tool] Releasing gripper\n",
            StatusMessage::CycleEnd => "[Tool] Harvest cycle END\n",
            StatusMessage::CycleAborted => "[Tool] Harvest cycle ABORTED\n",
            StatusMessage::StepEmergencyStop => "EMERGENCY STOP\n",
            StatusMessage::EmergencyStop => "[Tool] EMERGENCY STOP triggered\n",
            StatusMessage::EmergencyStopReleased => "[Tool] EMERGENCY STOP released\n",
        }
    }

    /// Parse a status line back into a message
    pub fn from_line(line: &str) -> Option<Self> {
        ALL_MESSAGES.iter().copied().find(|m| m.as_str() == line)
    }
}

const ALL_MESSAGES: [StatusMessage; 12] = [
    StatusMessage::Ready,
    StatusMessage::CycleStart,
    StatusMessage::Phase(CyclePhase::OpenGripper),
    StatusMessage::Phase(CyclePhase::Grip),
    StatusMessage::Phase(CyclePhase::Lower),
    StatusMessage::Phase(CyclePhase::Raise),
    StatusMessage::Phase(CyclePhase::Release),
    StatusMessage::CycleEnd,
    StatusMessage::CycleAborted,
    StatusMessage::StepEmergencyStop,
    StatusMessage::EmergencyStop,
    StatusMessage::EmergencyStopReleased,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_newline_terminated() {
        for msg in ALL_MESSAGES {
            assert!(msg.as_str().ends_with('\n'));
        }
    }

    #[test]
    fn test_emergency_lines_are_distinct() {
        assert_ne!(
            StatusMessage::StepEmergencyStop.as_str(),
            StatusMessage::EmergencyStop.as_str()
        );
    }

    #[test]
    fn test_from_line() {
        assert_eq!(
            StatusMessage::from_line("[Tool] Harvest cycle END\n"),
            Some(StatusMessage::CycleEnd)
        );
        assert_eq!(StatusMessage::from_line("nonsense"), None);
    }
}
