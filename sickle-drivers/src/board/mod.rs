//! Tool board
//!
//! Digital I/O wrappers and the [`BoardHardware`] implementation of the
//! hardware contract.

pub mod hardware;
pub mod signal;

pub use hardware::BoardHardware;
pub use signal::{SignalInput, StatusLed};
