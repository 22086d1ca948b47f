//! Timed motion
//!
//! A motion step drives one motor for a bounded time. The executor runs
//! steps against the hardware and preempts them on emergency stop.

pub mod executor;
pub mod step;

pub use executor::{MotionExecutor, DEFAULT_POLL_MS};
pub use step::{MotionStep, StepOutcome};
