//! 7-segment bus on eight GPIOs
//!
//! Bit 0 of the pattern drives the first pin, bit 7 the last. The pattern is
//! written as-is; inversion for common-anode parts is already in the byte.

use embassy_rp::gpio::{Level, Output};
use echolink_hal::SegmentBus;

/// Segment lines a..g plus the decimal point
pub struct RpSegmentPort<'d> {
    pins: [Output<'d>; 8],
}

impl<'d> RpSegmentPort<'d> {
    pub fn new(pins: [Output<'d>; 8]) -> Self {
        Self { pins }
    }
}

impl SegmentBus for RpSegmentPort<'_> {
    fn write_pattern(&mut self, pattern: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            pin.set_level(Level::from(pattern & (1 << bit) != 0));
        }
    }
}
