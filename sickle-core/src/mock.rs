//! Recording hardware double
//!
//! Records every output command with the simulated time it was issued,
//! advances simulated time on `delay_ms`, and replays scripted input
//! samples. Failures can be injected per operation.

use heapless::Vec;

use crate::status::StatusMessage;
use crate::traits::{DutyPercent, HardwareError, MotorDirection, MotorId, ToolHardware};

/// Maximum recorded commands
pub const MAX_RECORDS: usize = 256;

/// Maximum scripted samples per input
pub const MAX_SCRIPT: usize = 64;

/// Output command seen by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Init,
    MotorSet(MotorId, MotorDirection, DutyPercent),
    MotorBrake(MotorId),
    Indicator(bool),
    Status(StatusMessage),
}

/// Recorded command with its simulated timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub at_ms: u32,
    pub command: Command,
}

/// Scripted input samples
///
/// Sample `n` is the `n`-th read of the input (0-based). Reads past the
/// end of the script return the default level.
#[derive(Debug, Clone, Default)]
pub struct SignalScript {
    samples: Vec<bool, MAX_SCRIPT>,
    default: bool,
    /// Asserted for reads in `[from, to)`, overrides `samples`
    window: Option<(usize, usize)>,
    fail_all: bool,
    fail_first: usize,
    reads: usize,
}

impl SignalScript {
    fn set_samples(&mut self, samples: &[bool]) {
        self.samples.clear();
        for &s in samples.iter().take(MAX_SCRIPT) {
            let _ = self.samples.push(s);
        }
        self.window = None;
    }

    fn sample(&mut self) -> Result<bool, HardwareError> {
        let index = self.reads;
        self.reads += 1;

        if self.fail_all || index < self.fail_first {
            return Err(HardwareError::Input);
        }
        if let Some((from, to)) = self.window {
            return Ok(index >= from && index < to);
        }
        Ok(self.samples.get(index).copied().unwrap_or(self.default))
    }

    /// Number of reads so far
    pub fn reads(&self) -> usize {
        self.reads
    }
}

/// Recording implementation of [`ToolHardware`]
#[derive(Debug, Clone, Default)]
pub struct MockHardware {
    records: Vec<Record, MAX_RECORDS>,
    now_ms: u32,
    delay_calls: u32,
    indicator: bool,
    start: SignalScript,
    estop: SignalScript,
    fail_init: bool,
    fail_motor_set: Option<MotorId>,
    fail_brake: Option<MotorId>,
    fail_indicator: bool,
    fail_status: bool,
    unknown_status_lines: u32,
}

impl MockHardware {
    /// Create a mock with both inputs released
    pub fn new() -> Self {
        Self::default()
    }

    // ---- input scripting ----

    /// Script the start input, one entry per read
    pub fn script_start(&mut self, samples: &[bool]) {
        self.start.set_samples(samples);
    }

    /// Level returned by start reads past the end of the script
    pub fn script_start_default(&mut self, level: bool) {
        self.start.default = level;
    }

    /// Script the emergency-stop input, one entry per read
    pub fn script_estop(&mut self, samples: &[bool]) {
        self.estop.set_samples(samples);
    }

    /// Assert the emergency stop from the `n`-th read onwards
    pub fn estop_asserted_from(&mut self, n: usize) {
        self.estop.window = Some((n, usize::MAX));
    }

    /// Assert the emergency stop for reads in `[from, to)`
    pub fn estop_asserted_between(&mut self, from: usize, to: usize) {
        self.estop.window = Some((from, to));
    }

    // ---- failure injection ----

    pub fn fail_init(&mut self, fail: bool) {
        self.fail_init = fail;
    }

    pub fn fail_motor_set(&mut self, motor: Option<MotorId>) {
        self.fail_motor_set = motor;
    }

    pub fn fail_brake(&mut self, motor: Option<MotorId>) {
        self.fail_brake = motor;
    }

    pub fn fail_indicator(&mut self, fail: bool) {
        self.fail_indicator = fail;
    }

    pub fn fail_status(&mut self, fail: bool) {
        self.fail_status = fail;
    }

    pub fn fail_start_reads(&mut self, fail: bool) {
        self.start.fail_all = fail;
    }

    pub fn fail_estop_reads(&mut self, fail: bool) {
        self.estop.fail_all = fail;
    }

    /// Fail the first `n` emergency-stop reads
    pub fn fail_estop_reads_for(&mut self, n: usize) {
        self.estop.fail_first = n;
    }

    // ---- inspection ----

    /// Every recorded command in issue order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Motor set and brake commands in issue order
    pub fn motor_commands(&self) -> Vec<Command, MAX_RECORDS> {
        self.records
            .iter()
            .map(|r| r.command)
            .filter(|c| matches!(c, Command::MotorSet(..) | Command::MotorBrake(_)))
            .collect()
    }

    /// Last successful command issued to `motor`
    pub fn last_motor_command(&self, motor: MotorId) -> Option<Command> {
        self.records.iter().rev().map(|r| r.command).find(|c| match c {
            Command::MotorSet(m, ..) | Command::MotorBrake(m) => *m == motor,
            _ => false,
        })
    }

    /// Status messages in issue order
    pub fn statuses(&self) -> Vec<StatusMessage, MAX_RECORDS> {
        self.records
            .iter()
            .filter_map(|r| match r.command {
                Command::Status(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// Current indicator level
    pub fn indicator(&self) -> bool {
        self.indicator
    }

    /// Simulated time elapsed through `delay_ms`
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    /// Number of `delay_ms` calls
    pub fn delay_calls(&self) -> u32 {
        self.delay_calls
    }

    /// Number of emergency-stop reads
    pub fn estop_reads(&self) -> usize {
        self.estop.reads()
    }

    /// Number of start reads
    pub fn start_reads(&self) -> usize {
        self.start.reads()
    }

    /// Status lines that did not match a known message
    pub fn unknown_status_lines(&self) -> u32 {
        self.unknown_status_lines
    }

    fn record(&mut self, command: Command) {
        let _ = self.records.push(Record {
            at_ms: self.now_ms,
            command,
        });
    }
}

impl ToolHardware for MockHardware {
    fn init(&mut self) -> Result<(), HardwareError> {
        if self.fail_init {
            return Err(HardwareError::Input);
        }
        self.record(Command::Init);
        Ok(())
    }

    fn motor_set(
        &mut self,
        motor: MotorId,
        direction: MotorDirection,
        duty: DutyPercent,
    ) -> Result<(), HardwareError> {
        if self.fail_motor_set == Some(motor) {
            return Err(HardwareError::Motor(motor));
        }
        self.record(Command::MotorSet(motor, direction, duty));
        Ok(())
    }

    fn motor_brake(&mut self, motor: MotorId) -> Result<(), HardwareError> {
        if self.fail_brake == Some(motor) {
            return Err(HardwareError::Motor(motor));
        }
        self.record(Command::MotorBrake(motor));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms = self.now_ms.saturating_add(ms);
        self.delay_calls += 1;
    }

    fn read_start_signal(&mut self) -> Result<bool, HardwareError> {
        self.start.sample()
    }

    fn read_emergency_stop_signal(&mut self) -> Result<bool, HardwareError> {
        self.estop.sample()
    }

    fn set_status_indicator(&mut self, on: bool) -> Result<(), HardwareError> {
        if self.fail_indicator {
            return Err(HardwareError::Indicator);
        }
        self.indicator = on;
        self.record(Command::Indicator(on));
        Ok(())
    }

    fn send_status(&mut self, text: &str) -> Result<(), HardwareError> {
        if self.fail_status {
            return Err(HardwareError::Status);
        }
        match StatusMessage::from_line(text) {
            Some(msg) => self.record(Command::Status(msg)),
            None => self.unknown_status_lines += 1,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_default() {
        let mut hw = MockHardware::new();
        hw.script_start(&[true, false]);
        hw.script_start_default(true);

        assert_eq!(hw.read_start_signal(), Ok(true));
        assert_eq!(hw.read_start_signal(), Ok(false));
        assert_eq!(hw.read_start_signal(), Ok(true));
        assert_eq!(hw.start_reads(), 3);
    }

    #[test]
    fn test_estop_window() {
        let mut hw = MockHardware::new();
        hw.estop_asserted_between(1, 3);
        let samples: Vec<bool, 4> = (0..4)
            .map(|_| hw.read_emergency_stop_signal().unwrap())
            .collect();
        assert_eq!(samples.as_slice(), &[false, true, true, false]);
    }

    #[test]
    fn test_records_carry_time() {
        let mut hw = MockHardware::new();
        hw.delay_ms(40);
        hw.motor_brake(MotorId::Aux).unwrap();
        assert_eq!(
            hw.records()[0],
            Record {
                at_ms: 40,
                command: Command::MotorBrake(MotorId::Aux)
            }
        );
    }

    #[test]
    fn test_unknown_status_lines_counted() {
        let mut hw = MockHardware::new();
        hw.send_status("hello\n").unwrap();
        assert_eq!(hw.unknown_status_lines(), 1);
        assert!(hw.statuses().is_empty());
    }
}
