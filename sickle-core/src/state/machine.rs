//! State machine definition
//!
//! Motor behavior is a function of the current state and an event. The
//! `Running` state only lasts as long as the blocking cycle call, so from
//! the loop's point of view it is entered and left within one tick.

use super::events::Event;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Polling for a start edge
    #[default]
    Idle,
    /// Harvest cycle executing
    Running,
    /// Emergency stop asserted; outputs braked, start ignored
    Tripped,
}

impl State {
    /// Check if start edges are recognized in this state
    pub fn accepts_start(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // The emergency stop wins from any state
            (_, EmergencyStopAsserted) => Tripped,

            (Idle, StartEdge) => Running,

            (Running, CycleFinished(_)) => Idle,

            (Tripped, EmergencyStopReleased) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{CycleOutcome, CyclePhase};

    #[test]
    fn test_start_edge_runs_cycle() {
        let state = State::Idle.transition(Event::StartEdge);
        assert_eq!(state, State::Running);
        assert!(!state.accepts_start());

        let state = state.transition(Event::CycleFinished(CycleOutcome::Completed));
        assert_eq!(state, State::Idle);
    }

    #[test]
    fn test_estop_from_any_state() {
        for state in [State::Idle, State::Running, State::Tripped] {
            assert_eq!(state.transition(Event::EmergencyStopAsserted), State::Tripped);
        }
    }

    #[test]
    fn test_start_ignored_while_tripped() {
        let state = State::Tripped.transition(Event::StartEdge);
        assert_eq!(state, State::Tripped);
        assert!(!state.accepts_start());
    }

    #[test]
    fn test_release_returns_to_idle() {
        assert_eq!(State::Tripped.transition(Event::EmergencyStopReleased), State::Idle);
        // Release outside a trip is a no-op
        assert_eq!(State::Idle.transition(Event::EmergencyStopReleased), State::Idle);
    }

    #[test]
    fn test_aborted_cycle_returns_to_idle() {
        let outcome = CycleOutcome::Aborted {
            phase: CyclePhase::Lower,
        };
        assert_eq!(State::Running.transition(Event::CycleFinished(outcome)), State::Idle);
    }

    #[test]
    fn test_no_reentry_while_running() {
        assert_eq!(State::Running.transition(Event::StartEdge), State::Running);
    }
}
