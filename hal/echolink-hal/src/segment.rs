//! 7-segment pattern bus
//!
//! All digits share one 8-bit segment bus; the digit-select lines decide
//! which place lights up. The byte written is the raw port value, so for a
//! common-anode display it is already the complement of the segments-on mask.

/// Shared segment-pattern bus
pub trait SegmentBus {
    /// Drive the bus with a raw port pattern
    fn write_pattern(&mut self, pattern: u8);
}
