//! Sickle - Harvesting Tool Firmware
//!
//! Firmware for the RP2040 board on a robotic harvesting end effector.
//! Drives the gripper and vertical motors through one harvest cycle per
//! start request, with the emergency stop polled throughout.
//!
//! Pinout:
//!
//! | Function          | Pin          |
//! |-------------------|--------------|
//! | Status UART TX    | GPIO0        |
//! | Gripper IN1/IN2   | GPIO2/GPIO3  |
//! | Vertical IN1/IN2  | GPIO4/GPIO5  |
//! | Aux IN1/IN2       | GPIO6/GPIO7  |
//! | Start (to GND)    | GPIO14       |
//! | E-stop (to GND)   | GPIO15       |
//! | Status LED        | GPIO25       |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sickle_core::Controller;
use sickle_drivers::{BoardHardware, HBridgeMotor, SignalInput, StatusLed};

mod config;

/// PWM counter top: 125 MHz / (6249 + 1) = 20 kHz, above audible range
const PWM_TOP: u16 = 6249;

/// Status line baud rate
const STATUS_BAUD: u32 = 115_200;

type Motor = HBridgeMotor<PwmOutput<'static>, PwmOutput<'static>>;

/// Split a PWM slice into the two inputs of an H-bridge
fn hbridge(pwm: Pwm<'static>) -> Motor {
    let (in1, in2) = pwm.split();
    let in1 = unwrap!(in1, "PWM channel A should be available");
    let in2 = unwrap!(in2, "PWM channel B should be available");
    unwrap!(HBridgeMotor::new(in1, in2).ok(), "H-bridge init failed")
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sickle firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;

    let gripper = hbridge(Pwm::new_output_ab(
        p.PWM_SLICE1,
        p.PIN_2,
        p.PIN_3,
        pwm_config.clone(),
    ));
    let vertical = hbridge(Pwm::new_output_ab(
        p.PWM_SLICE2,
        p.PIN_4,
        p.PIN_5,
        pwm_config.clone(),
    ));
    let aux = hbridge(Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, pwm_config));

    // Buttons pull to ground
    let start = SignalInput::active_low(Input::new(p.PIN_14, Pull::Up));
    let estop = SignalInput::active_low(Input::new(p.PIN_15, Pull::Up));
    let led = StatusLed::new(Output::new(p.PIN_25, Level::Low), false);

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = STATUS_BAUD;
    let status = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    let board = BoardHardware::new(
        [gripper, vertical, aux],
        start,
        estop,
        led,
        Delay,
        status,
    );
    info!("Board ready, entering control loop");

    Controller::new(board, &config).run()
}
