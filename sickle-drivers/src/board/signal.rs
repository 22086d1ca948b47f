//! Digital signal wrappers
//!
//! The start and emergency-stop buttons on the tool are usually wired to
//! ground with a pull-up, so "asserted" is a low pin. Both wrappers carry
//! that polarity so the control logic only ever sees logical levels.

use embedded_hal::digital::{InputPin, OutputPin};

/// Polled digital input with configurable polarity
pub struct SignalInput<P> {
    pin: P,
    /// If true, asserted = pin LOW
    active_low: bool,
}

impl<P: InputPin> SignalInput<P> {
    /// Create a new input
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Create an input that is asserted when the pin is LOW
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Sample the logical level
    pub fn is_asserted(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(high != self.active_low)
    }
}

/// Status LED with configurable polarity
pub struct StatusLed<P> {
    pin: P,
    /// If true, LED on = pin LOW
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create a new LED; the pin is not driven until [`StatusLed::set`]
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            on: false,
        }
    }

    /// Switch the LED
    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on != self.active_low {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.on = on;
        Ok(())
    }

    /// Last level successfully written
    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_input() {
        let mut input = SignalInput::new(MockPin { high: true }, false);
        assert_eq!(input.is_asserted(), Ok(true));

        input.pin.high = false;
        assert_eq!(input.is_asserted(), Ok(false));
    }

    #[test]
    fn test_active_low_input() {
        let mut input = SignalInput::active_low(MockPin { high: true });
        // Pulled up, button released
        assert_eq!(input.is_asserted(), Ok(false));

        input.pin.high = false;
        assert_eq!(input.is_asserted(), Ok(true));
    }

    #[test]
    fn test_active_high_led() {
        let mut led = StatusLed::new(MockPin { high: false }, false);

        led.set(true).unwrap();
        assert!(led.is_on());
        assert!(led.pin.high);

        led.set(false).unwrap();
        assert!(!led.is_on());
        assert!(!led.pin.high);
    }

    #[test]
    fn test_active_low_led() {
        let mut led = StatusLed::new(MockPin { high: false }, true);

        led.set(false).unwrap();
        assert!(led.pin.high);

        led.set(true).unwrap();
        assert!(led.is_on());
        assert!(!led.pin.high);
    }
}
