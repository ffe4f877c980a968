//! Hardware driver implementations
//!
//! This crate provides concrete drivers built on the traits defined in
//! echolink-hal, feeding the logic in echolink-core:
//!
//! - Ultrasonic ranger (trigger pulse + echo capture)
//! - Three-axis analog accelerometer
//! - Alarm speaker (PWM tone)
//! - Multiplexed 7-segment display
//! - Debounced push-button

#![no_std]
#![deny(unsafe_code)]

pub mod accelerometer;
pub mod button;
pub mod seven_segment;
pub mod speaker;
pub mod ultrasonic;

#[cfg(test)]
mod mock;

pub use accelerometer::Accelerometer;
pub use button::DebouncedButton;
pub use seven_segment::MultiplexedDisplay;
pub use speaker::Speaker;
pub use ultrasonic::EchoRanger;
