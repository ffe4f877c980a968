//! Seven-segment display model
//!
//! The display node keeps the last decoded frame as a [`DisplayState`] and
//! walks it place by place with a [`ScanPlan`]. Place 0 is the rightmost
//! (least-significant) digit.

use echolink_protocol::{DecodedFrame, MAX_DIGITS};

/// Segment masks for 0-9, bit 6 = a ... bit 0 = g
const DIGIT_SEGMENTS: [u8; 10] = [0x7E, 0x30, 0x6D, 0x79, 0x33, 0x5B, 0x5F, 0x70, 0x7F, 0x7B];

/// Bus value that turns every segment off on a common-anode display
pub const BLANK_PATTERN: u8 = 0xFF;

/// Common-anode bus value for an ASCII character.
///
/// The segments are active-low, so the value written is the complement of the
/// lit-segment mask. Anything other than `'0'..='9'` is blank.
pub const fn segment_pattern(ascii: u8) -> u8 {
    match ascii {
        b'0'..=b'9' => !DIGIT_SEGMENTS[(ascii - b'0') as usize],
        _ => BLANK_PATTERN,
    }
}

/// Digits currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    digits: [u8; MAX_DIGITS],
    count: u8,
}

impl DisplayState {
    /// Nothing lit
    pub const BLANK: Self = Self {
        digits: [b'0'; MAX_DIGITS],
        count: 0,
    };

    /// Take digits and count from a decoded frame; an unknown count is blank
    pub fn from_frame(frame: &DecodedFrame) -> Self {
        match frame.digit_count {
            Some(count) => Self {
                digits: frame.digits,
                count: count.min(MAX_DIGITS as u8),
            },
            None => Self::BLANK,
        }
    }

    /// Number of places lit
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Whether nothing is shown
    pub fn is_blank(&self) -> bool {
        self.count == 0
    }

    /// ASCII digit at a place
    pub fn digit(&self, place: usize) -> Option<u8> {
        (place < self.count as usize).then(|| self.digits[place])
    }

    /// Scan order for this state, limited to the wired places
    pub fn scan_plan(&self, places: u8) -> ScanPlan {
        ScanPlan {
            state: *self,
            limit: self.count.min(places),
            next: 0,
        }
    }
}

/// One multiplex slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanStep {
    /// Digit-select line to assert
    pub place: usize,
    /// Segment bus value
    pub pattern: u8,
}

/// Iterator over the places to strobe in one scan pass
#[derive(Debug, Clone)]
pub struct ScanPlan {
    state: DisplayState,
    limit: u8,
    next: u8,
}

impl Iterator for ScanPlan {
    type Item = ScanStep;

    fn next(&mut self) -> Option<ScanStep> {
        if self.next >= self.limit {
            return None;
        }
        let place = self.next as usize;
        self.next += 1;
        Some(ScanStep {
            place,
            pattern: segment_pattern(self.state.digits[place]),
        })
    }
}
