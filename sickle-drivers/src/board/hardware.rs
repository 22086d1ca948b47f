//! Tool board implementation of [`ToolHardware`]
//!
//! Built from three DC motors, the start and emergency-stop inputs, a
//! status LED, a blocking delay and a byte sink for status lines (the
//! UART on the reference board).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_io::Write;
use sickle_core::traits::{DutyPercent, HardwareError, MotorDirection, MotorId, ToolHardware};

use super::signal::{SignalInput, StatusLed};
use crate::motor::DcMotor;

/// Complete tool board
pub struct BoardHardware<M, I, O, D, W> {
    /// Indexed by [`MotorId::index`]
    motors: [M; MotorId::COUNT],
    start: SignalInput<I>,
    estop: SignalInput<I>,
    led: StatusLed<O>,
    delay: D,
    status: W,
}

impl<M, I, O, D, W> BoardHardware<M, I, O, D, W>
where
    M: DcMotor,
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
    W: Write,
{
    /// Assemble the board
    ///
    /// `motors` is ordered gripper, vertical, aux.
    pub fn new(
        motors: [M; MotorId::COUNT],
        start: SignalInput<I>,
        estop: SignalInput<I>,
        led: StatusLed<O>,
        delay: D,
        status: W,
    ) -> Self {
        Self {
            motors,
            start,
            estop,
            led,
            delay,
            status,
        }
    }

    /// Access a motor driver
    pub fn motor(&self, motor: MotorId) -> &M {
        &self.motors[motor.index()]
    }

    /// Access the status LED
    pub fn led(&self) -> &StatusLed<O> {
        &self.led
    }

    /// Access the status sink
    pub fn status_sink(&self) -> &W {
        &self.status
    }
}

impl<M, I, O, D, W> ToolHardware for BoardHardware<M, I, O, D, W>
where
    M: DcMotor,
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
    W: Write,
{
    fn init(&mut self) -> Result<(), HardwareError> {
        for motor in MotorId::ALL {
            self.motors[motor.index()]
                .coast()
                .map_err(|_| HardwareError::Motor(motor))?;
        }
        self.led.set(false).map_err(|_| HardwareError::Indicator)
    }

    fn motor_set(
        &mut self,
        motor: MotorId,
        direction: MotorDirection,
        duty: DutyPercent,
    ) -> Result<(), HardwareError> {
        self.motors[motor.index()]
            .drive(direction, duty)
            .map_err(|_| HardwareError::Motor(motor))
    }

    fn motor_brake(&mut self, motor: MotorId) -> Result<(), HardwareError> {
        self.motors[motor.index()]
            .brake()
            .map_err(|_| HardwareError::Motor(motor))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn read_start_signal(&mut self) -> Result<bool, HardwareError> {
        self.start.is_asserted().map_err(|_| HardwareError::Input)
    }

    fn read_emergency_stop_signal(&mut self) -> Result<bool, HardwareError> {
        self.estop.is_asserted().map_err(|_| HardwareError::Input)
    }

    fn set_status_indicator(&mut self, on: bool) -> Result<(), HardwareError> {
        self.led.set(on).map_err(|_| HardwareError::Indicator)
    }

    fn send_status(&mut self, text: &str) -> Result<(), HardwareError> {
        self.status
            .write_all(text.as_bytes())
            .map_err(|_| HardwareError::Status)?;
        self.status.flush().map_err(|_| HardwareError::Status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::MotorError;
    use core::convert::Infallible;
    use sickle_core::{Controller, TickOutcome, ToolConfig};

    /// Motor double remembering the last command
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Drive {
        Coast,
        Run(MotorDirection, u8),
        Brake,
    }

    struct MockMotor {
        last: Option<Drive>,
        broken: bool,
    }

    impl MockMotor {
        fn new() -> Self {
            Self {
                last: None,
                broken: false,
            }
        }
    }

    impl DcMotor for MockMotor {
        fn drive(&mut self, direction: MotorDirection, duty: DutyPercent) -> Result<(), MotorError> {
            if self.broken {
                return Err(MotorError::Pwm);
            }
            self.last = Some(match direction {
                MotorDirection::Stop => Drive::Coast,
                _ => Drive::Run(direction, duty.get()),
            });
            Ok(())
        }

        fn brake(&mut self) -> Result<(), MotorError> {
            if self.broken {
                return Err(MotorError::Pwm);
            }
            self.last = Some(Drive::Brake);
            Ok(())
        }
    }

    struct Pin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl InputPin for Pin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    impl OutputPin for Pin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    /// Delay double accumulating simulated time
    struct Clock {
        ns: u64,
    }

    impl Clock {
        fn ms(&self) -> u64 {
            self.ns / 1_000_000
        }
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += ns as u64;
        }
    }

    /// Status sink collecting bytes
    struct Sink {
        buf: heapless::Vec<u8, 1024>,
    }

    impl Sink {
        fn text(&self) -> &str {
            core::str::from_utf8(&self.buf).unwrap()
        }
    }

    impl embedded_io::ErrorType for Sink {
        type Error = Infallible;
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let n = buf.len().min(self.buf.capacity() - self.buf.len());
            let _ = self.buf.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    type Board = BoardHardware<MockMotor, Pin, Pin, Clock, Sink>;

    /// Buttons are active-low with pull-ups; `start_pressed` sets the
    /// start pin level accordingly, the e-stop is released.
    fn board(start_pressed: bool) -> Board {
        BoardHardware::new(
            [MockMotor::new(), MockMotor::new(), MockMotor::new()],
            SignalInput::active_low(Pin {
                high: !start_pressed,
            }),
            SignalInput::active_low(Pin { high: true }),
            StatusLed::new(Pin { high: false }, false),
            Clock { ns: 0 },
            Sink {
                buf: heapless::Vec::new(),
            },
        )
    }

    #[test]
    fn test_init_coasts_motors() {
        let mut hw = board(false);
        hw.init().unwrap();

        for motor in MotorId::ALL {
            assert_eq!(hw.motor(motor).last, Some(Drive::Coast));
        }
        assert!(!hw.led().is_on());
    }

    #[test]
    fn test_motor_routing() {
        let mut hw = board(false);
        hw.motor_set(MotorId::Vertical, MotorDirection::Reverse, DutyPercent::new(70))
            .unwrap();
        hw.motor_brake(MotorId::Aux).unwrap();

        assert_eq!(hw.motor(MotorId::Gripper).last, None);
        assert_eq!(
            hw.motor(MotorId::Vertical).last,
            Some(Drive::Run(MotorDirection::Reverse, 70))
        );
        assert_eq!(hw.motor(MotorId::Aux).last, Some(Drive::Brake));
    }

    #[test]
    fn test_motor_fault_names_motor() {
        let mut hw = board(false);
        hw.motors[MotorId::Gripper.index()].broken = true;

        assert_eq!(
            hw.motor_brake(MotorId::Gripper),
            Err(HardwareError::Motor(MotorId::Gripper))
        );
    }

    #[test]
    fn test_active_low_signals() {
        let mut hw = board(true);
        assert_eq!(hw.read_start_signal(), Ok(true));
        assert_eq!(hw.read_emergency_stop_signal(), Ok(false));
    }

    #[test]
    fn test_status_written_verbatim() {
        let mut hw = board(false);
        hw.send_status("[Tool] Harvest cycle START\n").unwrap();
        assert_eq!(hw.status_sink().text(), "[Tool] Harvest cycle START\n");
    }

    #[test]
    fn test_delay_uses_provider() {
        let mut hw = board(false);
        hw.delay_ms(25);
        assert_eq!(hw.delay.ms(), 25);
    }

    #[test]
    fn test_controller_runs_cycle_on_board() {
        let mut ctl = Controller::new(board(true), &ToolConfig::default());
        ctl.start().unwrap();

        assert_eq!(
            ctl.tick(),
            TickOutcome::CycleRan(sickle_core::scheduler::CycleOutcome::Completed)
        );

        let hw = ctl.into_hardware();
        for motor in [MotorId::Gripper, MotorId::Vertical] {
            assert_eq!(hw.motor(motor).last, Some(Drive::Brake));
        }
        assert!(!hw.led().is_on());
        assert!(hw.status_sink().text().ends_with("[Tool] Harvest cycle END\n"));
        assert_eq!(hw.delay.ms(), 5200 + 250 + 10);
    }
}
