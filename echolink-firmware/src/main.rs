//! Echolink - Ultrasonic Ranging and Telemetry Firmware
//!
//! One image for both boards of the link. At boot the role strap selects
//! either the sensor node (ultrasonic ranger, accelerometer, alarm speaker,
//! UART transmitter) or the display node (UART receiver, multiplexed
//! 7-segment display).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, BufferedUartTx, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use echolink_core::alarm::ToneTable;
use echolink_core::capture::PulseCapture;
use echolink_core::config::NodeConfig;
use echolink_core::state::{Event, Role};
use echolink_drivers::{Accelerometer, DebouncedButton, EchoRanger, MultiplexedDisplay, Speaker};
use echolink_hal::uart::UartConfig;
use echolink_hal_rp2040::uart::embassy_config;
use echolink_hal_rp2040::{
    LinkRx, LinkTx, RpAdc, RpInput, RpOutput, RpSegmentPort, RpTone, SharedCapture,
};

use crate::channels::ECHO_CAPTURE;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Echolink firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    config::log_summary(&config);

    // Role strap: GPIO22, pulled down so an open strap boots the sensor
    let strap = Input::new(p.PIN_22, Pull::Down);
    let role = Role::from_strap(strap.is_high());
    info!("Role: {:?}", role);

    // Telemetry link on UART0 (GPIO0 TX, GPIO1 RX)
    let uart_config = UartConfig {
        baudrate: config.link.baudrate,
        ..UartConfig::default()
    };
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, embassy_config(&uart_config));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", uart_config.baudrate);

    spawner.spawn(tasks::health_task()).unwrap();

    match role {
        Role::Sensor => {
            // Echo capture: trigger GPIO2, echo GPIO3
            ECHO_CAPTURE.with(|capture| {
                *capture = PulseCapture::new(config.sensor.timer_width, config.sensor.echo_policy)
            });
            let trigger = RpOutput::new(Output::new(p.PIN_2, Level::Low));
            let echo = Input::new(p.PIN_3, Pull::None);
            let ranger = EchoRanger::new(
                trigger,
                SharedCapture::new(&ECHO_CAPTURE),
                Delay,
                &config.sensor,
            );

            // Accelerometer axes on GPIO26/27/28
            let adc = Adc::new_blocking(p.ADC, adc::Config::default());
            let adc = RpAdc::new(adc)
                .with_channel(0, Channel::new_pin(p.PIN_26, Pull::None))
                .with_channel(1, Channel::new_pin(p.PIN_27, Pull::None))
                .with_channel(2, Channel::new_pin(p.PIN_28, Pull::None));
            let accel = Accelerometer::new(adc, &config.tilt);

            // Speaker on GPIO4 (PWM slice 2, channel A)
            let pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, PwmConfig::default());
            let speaker = Speaker::new(RpTone::new(pwm), ToneTable::NOTES);

            // Buttons to ground on GPIO6 (mode) and GPIO7 (preset)
            let debounce = config.button.debounce_ms;
            let mode_button = DebouncedButton::new(
                RpInput::new(Input::new(p.PIN_6, Pull::Up)),
                Delay,
                debounce,
                true,
            );
            let preset_button = DebouncedButton::new(
                RpInput::new(Input::new(p.PIN_7, Pull::Up)),
                Delay,
                debounce,
                true,
            );

            info!("Sensor peripherals initialized");

            spawn_sensor(&spawner, ranger, echo, accel, speaker, tx, &config);
            spawner
                .spawn(tasks::button_task(mode_button, Event::ModeButton))
                .unwrap();
            spawner
                .spawn(tasks::button_task(preset_button, Event::PresetButton))
                .unwrap();
        }
        Role::Display => {
            // Segments a..g + dp on GPIO8-15 (high = off for common anode)
            let segments = RpSegmentPort::new([
                Output::new(p.PIN_8, Level::High),
                Output::new(p.PIN_9, Level::High),
                Output::new(p.PIN_10, Level::High),
                Output::new(p.PIN_11, Level::High),
                Output::new(p.PIN_12, Level::High),
                Output::new(p.PIN_13, Level::High),
                Output::new(p.PIN_14, Level::High),
                Output::new(p.PIN_15, Level::High),
            ]);

            // Digit selects on GPIO16-19, place 0 = rightmost
            let selects = [
                RpOutput::new(Output::new(p.PIN_16, Level::Low)),
                RpOutput::new(Output::new(p.PIN_17, Level::Low)),
                RpOutput::new(Output::new(p.PIN_18, Level::Low)),
                RpOutput::new(Output::new(p.PIN_19, Level::Low)),
            ];

            let display = MultiplexedDisplay::new(segments, selects, Delay, &config.display);

            info!("Display peripherals initialized");

            spawn_display(&spawner, display, rx, &config);
        }
    }

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Spawn the sensor node's tasks
fn spawn_sensor(
    spawner: &Spawner,
    ranger: tasks::sensor::Ranger,
    echo: Input<'static>,
    accel: tasks::sensor::Tilt,
    speaker: tasks::sensor::Alarm,
    tx: BufferedUartTx,
    config: &NodeConfig,
) {
    spawner.spawn(tasks::echo_task(echo)).unwrap();
    spawner
        .spawn(tasks::link_tx_task(LinkTx::new(tx), config.link.baudrate))
        .unwrap();
    spawner
        .spawn(tasks::sensor_task(ranger, accel, speaker, *config))
        .unwrap();
}

/// Spawn the display node's tasks
fn spawn_display(
    spawner: &Spawner,
    display: tasks::display::Display,
    rx: BufferedUartRx,
    config: &NodeConfig,
) {
    spawner
        .spawn(tasks::link_rx_task(
            LinkRx::new(rx),
            config.link.layout.frame_layout(),
        ))
        .unwrap();
    spawner.spawn(tasks::display_task(display, *config)).unwrap();
}
