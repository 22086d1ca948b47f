//! Main control loop
//!
//! Polls the start and emergency-stop inputs once per tick:
//!
//! 1. Sample `start`, then the emergency stop.
//! 2. E-stop asserted: run the safety controller once, then hold, polling
//!    only the emergency stop until it clears. Start edges during the hold
//!    are discarded.
//! 3. Otherwise a rising edge on `start` runs exactly one harvest cycle,
//!    followed by the inter-cycle delay.
//! 4. Remember `start` for the next tick and wait one tick.
//!
//! Everything is blocking, so a cycle can never be re-entered while one is
//! in flight.

use super::edge::EdgeDetector;
use crate::config::{TimingConfig, ToolConfig};
use crate::motion::MotionExecutor;
use crate::safety;
use crate::scheduler::{CycleOutcome, HarvestCycle, Sequencer};
use crate::state::{Event, State};
use crate::status::StatusMessage;
use crate::traits::{
    emergency_stop_asserted, report, start_asserted, HardwareError, ToolHardware,
};

/// What one polling tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing to do
    Idle,
    /// A start edge ran one harvest cycle
    CycleRan(CycleOutcome),
    /// The emergency stop was asserted and held for `polls` samples
    HeldInEmergencyStop { polls: u32 },
}

/// Harvest tool controller
pub struct Controller<H: ToolHardware> {
    hw: H,
    sequencer: Sequencer,
    timing: TimingConfig,
    state: State,
    start_edge: EdgeDetector,
    cycles_completed: u32,
    cycles_aborted: u32,
    trips: u32,
}

impl<H: ToolHardware> Controller<H> {
    /// Create a controller; the cycle script is built from `config` here
    pub fn new(hw: H, config: &ToolConfig) -> Self {
        let sequencer = Sequencer::new(
            HarvestCycle::from_config(config),
            MotionExecutor::new(config.timing.step_poll_ms),
            config.cycle,
        );

        Self {
            hw,
            sequencer,
            timing: config.timing,
            state: State::Idle,
            start_edge: EdgeDetector::new(false),
            cycles_completed: 0,
            cycles_aborted: 0,
            trips: 0,
        }
    }

    /// Initialize the hardware and announce readiness
    ///
    /// On failure the tool is put in its safe state; the loop can still
    /// run since failed input reads are handled fail-safe.
    pub fn start(&mut self) -> Result<(), HardwareError> {
        if let Err(e) = self.hw.init() {
            log_warn!("Hardware init failed: {:?}", e);
            safety::emergency_stop(&mut self.hw);
            return Err(e);
        }

        report(&mut self.hw, StatusMessage::Ready.as_str());
        log_info!("Controller ready");
        Ok(())
    }

    /// Run the control loop forever
    pub fn run(mut self) -> ! {
        if let Err(e) = self.start() {
            log_warn!("Running with hardware fault from init: {:?}", e);
        }
        loop {
            self.tick();
        }
    }

    /// Run one polling tick
    pub fn tick(&mut self) -> TickOutcome {
        let start = start_asserted(&mut self.hw);

        if emergency_stop_asserted(&mut self.hw) {
            let polls = self.hold_emergency_stop();

            // Whatever start did during the hold is not an edge
            let level = start_asserted(&mut self.hw);
            self.start_edge.reset(level);

            self.hw.delay_ms(self.timing.loop_tick_ms);
            return TickOutcome::HeldInEmergencyStop { polls };
        }

        let outcome = if self.start_edge.update(start) && self.state.accepts_start() {
            let result = self.run_cycle();
            self.hw.delay_ms(self.timing.inter_cycle_ms);
            TickOutcome::CycleRan(result)
        } else {
            TickOutcome::Idle
        };

        self.hw.delay_ms(self.timing.loop_tick_ms);
        outcome
    }

    fn run_cycle(&mut self) -> CycleOutcome {
        self.apply(Event::StartEdge);

        let outcome = self.sequencer.run(&mut self.hw);
        match outcome {
            CycleOutcome::Completed => {
                self.cycles_completed = self.cycles_completed.saturating_add(1)
            }
            CycleOutcome::Aborted { .. } => {
                self.cycles_aborted = self.cycles_aborted.saturating_add(1)
            }
        }

        self.apply(Event::CycleFinished(outcome));
        outcome
    }

    /// Safe the tool and block until the emergency stop clears
    ///
    /// Returns the number of asserted samples, including the one that
    /// triggered the hold.
    fn hold_emergency_stop(&mut self) -> u32 {
        self.apply(Event::EmergencyStopAsserted);
        self.trips = self.trips.saturating_add(1);
        safety::emergency_stop(&mut self.hw);

        let mut polls: u32 = 1;
        while emergency_stop_asserted(&mut self.hw) {
            self.hw.delay_ms(self.timing.hold_poll_ms);
            polls = polls.saturating_add(1);
        }

        self.apply(Event::EmergencyStopReleased);
        report(&mut self.hw, StatusMessage::EmergencyStopReleased.as_str());
        log_info!("Emergency stop released after {} polls", polls);
        polls
    }

    fn apply(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next != self.state {
            if event.is_safety_event() {
                log_info!("State {:?} -> {:?} on {:?}", self.state, next, event);
            } else {
                log_debug!("State {:?} -> {:?} on {:?}", self.state, next, event);
            }
        }
        self.state = next;
    }

    /// Get the current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of cycles that ran every step
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Number of cycles cut short by the emergency stop
    pub fn cycles_aborted(&self) -> u32 {
        self.cycles_aborted
    }

    /// Number of emergency-stop holds entered by the loop
    pub fn trips(&self) -> u32 {
        self.trips
    }

    /// Get the cycle script in use
    pub fn cycle(&self) -> &HarvestCycle {
        self.sequencer.cycle()
    }

    /// Access the hardware
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Access the hardware mutably
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Consume the controller and return the hardware
    pub fn into_hardware(self) -> H {
        self.hw
    }
}
