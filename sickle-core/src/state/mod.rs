//! State machine for the control loop
//!
//! Defines the observable states of the controller. The state machine is
//! explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
