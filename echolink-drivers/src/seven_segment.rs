//! Multiplexed common-anode 7-segment display
//!
//! All digits share the segment bus. One digit-select line is asserted at a
//! time and held for the dwell period; persistence of vision does the rest.

use echolink_core::config::DisplayConfig;
use echolink_core::display::{DisplayState, BLANK_PATTERN};
use echolink_hal::gpio::set_all_low;
use echolink_hal::{OutputPin, SegmentBus};
use embedded_hal_async::delay::DelayNs;

/// Segment bus plus `K` digit-select lines (place 0 = rightmost)
pub struct MultiplexedDisplay<B, P, D, const K: usize> {
    bus: B,
    selects: [P; K],
    delay: D,
    dwell_us: u32,
    places: u8,
}

impl<B: SegmentBus, P: OutputPin, D: DelayNs, const K: usize> MultiplexedDisplay<B, P, D, K> {
    /// Create a display with every digit off
    pub fn new(mut bus: B, mut selects: [P; K], delay: D, config: &DisplayConfig) -> Self {
        set_all_low(&mut selects);
        bus.write_pattern(BLANK_PATTERN);
        Self {
            bus,
            selects,
            delay,
            dwell_us: config.dwell_us,
            places: config.places.min(K as u8),
        }
    }

    /// Strobe each active place once.
    ///
    /// For every place: all selects off, assert exactly that select, write
    /// its pattern, hold for the dwell. A blank state keeps every select off
    /// for one dwell period.
    pub async fn scan_pass(&mut self, state: &DisplayState) {
        if state.is_blank() {
            set_all_low(&mut self.selects);
            self.bus.write_pattern(BLANK_PATTERN);
            self.delay.delay_us(self.dwell_us).await;
            return;
        }

        for step in state.scan_plan(self.places) {
            set_all_low(&mut self.selects);
            self.selects[step.place].set_high();
            self.bus.write_pattern(step.pattern);
            self.delay.delay_us(self.dwell_us).await;
        }
        set_all_low(&mut self.selects);
    }

    /// Turn every digit off
    pub fn blank(&mut self) {
        set_all_low(&mut self.selects);
        self.bus.write_pattern(BLANK_PATTERN);
    }
}
