//! RP2040-specific HAL for the Echolink nodes
//!
//! Implements the `echolink-hal` traits on top of `embassy-rp`:
//!
//! - GPIO wrappers (trigger, strap, buttons, digit selects)
//! - ADC channel mapping for the accelerometer axes
//! - PWM tone output for the alarm speaker
//! - 8-pin segment bus
//! - Echo edge capture backed by a shared [`PulseCapture`](echolink_core::capture::PulseCapture)
//! - UART configuration and byte-level link halves

#![no_std]

pub mod adc;
pub mod capture;
pub mod gpio;
pub mod pwm;
pub mod segment;
pub mod uart;

pub use adc::RpAdc;
pub use capture::{capture_edges, SharedCapture};
pub use gpio::{RpInput, RpOutput};
pub use pwm::RpTone;
pub use segment::RpSegmentPort;
pub use uart::{LinkRx, LinkTx};
