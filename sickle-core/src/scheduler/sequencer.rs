//! Harvest cycle sequencer
//!
//! Runs the five scripted steps in order with settle delays between them.
//! The status indicator brackets the whole cycle.
//!
//! When a step reports a trip, the remaining steps are skipped (unless
//! `abort_on_trip` is off, in which case they are still issued and each
//! one re-checks the emergency stop on its own). With `abort_on_trip` on,
//! the emergency stop is also sampled after each settle delay, so an
//! assertion between steps never energizes the next motor.

use super::cycle::{CyclePhase, HarvestCycle};
use crate::config::CycleConfig;
use crate::motion::MotionExecutor;
use crate::status::StatusMessage;
use crate::safety;
use crate::traits::{emergency_stop_asserted, indicate, report, ToolHardware};

/// How a harvest cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Every step ran its full duration
    Completed,
    /// The emergency stop tripped during `phase`
    Aborted { phase: CyclePhase },
}

impl CycleOutcome {
    /// Check if every step ran to completion
    pub fn is_completed(self) -> bool {
        self == CycleOutcome::Completed
    }
}

/// Executes harvest cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    cycle: HarvestCycle,
    executor: MotionExecutor,
    config: CycleConfig,
}

impl Sequencer {
    /// Create a sequencer for a cycle script
    pub fn new(cycle: HarvestCycle, executor: MotionExecutor, config: CycleConfig) -> Self {
        Self {
            cycle,
            executor,
            config,
        }
    }

    /// Get the cycle script
    pub fn cycle(&self) -> &HarvestCycle {
        &self.cycle
    }

    /// Run one complete harvest cycle (blocking)
    pub fn run<H: ToolHardware + ?Sized>(&self, hw: &mut H) -> CycleOutcome {
        log_info!(
            "Harvest cycle start, {} ms nominal",
            self.cycle.nominal_duration_ms()
        );
        report(hw, StatusMessage::CycleStart.as_str());
        indicate(hw, true);

        let mut tripped_in: Option<CyclePhase> = None;
        let mut previous: Option<CyclePhase> = None;

        for step in self.cycle.steps() {
            if let Some(phase) = previous {
                if self.config.abort_on_trip && emergency_stop_asserted(hw) {
                    log_warn!("Emergency stop between steps after {:?}", phase);
                    safety::emergency_stop(hw);
                    tripped_in = Some(phase);
                    break;
                }
            }
            previous = Some(step.phase);

            report(hw, StatusMessage::Phase(step.phase).as_str());

            let outcome = self.executor.run(hw, &step.motion);
            if outcome.is_tripped() {
                if tripped_in.is_none() {
                    tripped_in = Some(step.phase);
                }
                if self.config.abort_on_trip {
                    break;
                }
            }

            if step.settle_ms > 0 {
                hw.delay_ms(step.settle_ms);
            }
        }

        indicate(hw, false);

        match tripped_in {
            Some(phase) if self.config.abort_on_trip => {
                report(hw, StatusMessage::CycleAborted.as_str());
                log_warn!("Harvest cycle aborted during {:?}", phase);
                CycleOutcome::Aborted { phase }
            }
            Some(phase) => {
                report(hw, StatusMessage::CycleEnd.as_str());
                log_warn!("Harvest cycle ran through a trip in {:?}", phase);
                CycleOutcome::Aborted { phase }
            }
            None => {
                report(hw, StatusMessage::CycleEnd.as_str());
                log_info!("Harvest cycle complete");
                CycleOutcome::Completed
            }
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(
            HarvestCycle::default(),
            MotionExecutor::default(),
            CycleConfig::default(),
        )
    }
}
