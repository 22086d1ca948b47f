//! Harvest cycle scheduling
//!
//! Defines the fixed harvest cycle script and runs it step by step.

pub mod cycle;
pub mod sequencer;

pub use cycle::{CyclePhase, CycleStep, HarvestCycle, CYCLE_STEPS};
pub use sequencer::{CycleOutcome, Sequencer};
