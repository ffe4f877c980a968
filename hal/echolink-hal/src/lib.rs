//! Echolink Hardware Abstraction Layer
//!
//! This crate defines the hardware primitives the ranging pipeline consumes.
//! Chip-specific crates implement them; the core logic and drivers only ever
//! see these traits, so everything above this layer runs on the host in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  echolink-firmware / echolink-drivers   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  echolink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ echolink-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (trigger, strap, digit selects)
//! - [`uart::UartTx`], [`uart::UartRx`] - Byte-at-a-time serial link
//! - [`capture::EdgeCapture`] - Dual-edge timer capture of the echo pulse
//! - [`adc::AdcReader`] - Start-conversion / read-result analog sampling
//! - [`pwm::ToneOutput`] - Period/duty PWM for the alarm speaker
//! - [`segment::SegmentBus`] - Shared 7-segment pattern bus

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod capture;
pub mod gpio;
pub mod pwm;
pub mod segment;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AdcReader};
pub use capture::{CaptureStatus, EdgeCapture};
pub use gpio::{InputPin, OutputPin};
pub use pwm::ToneOutput;
pub use segment::SegmentBus;
pub use uart::{UartRx, UartTx};
