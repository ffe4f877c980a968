//! Frame encoding and decoding for the telemetry link.
//!
//! Frame format (fixed length per layout):
//! - DIGITS (1-4 bytes): ASCII `'0'..='9'`, least-significant digit first
//! - COUNT (1 byte): ASCII digit count, how many DIGITS slots are significant
//! - TAG (0 or 1 byte): ASCII mode tag, `'D'` ranging or `'A'` tilt
//! - SENTINEL (1 byte): `','` (0x2C)
//!
//! There is no start byte and no checksum. Digits are always 0x30-0x39 so the
//! sentinel can never appear inside the payload.

/// End-of-frame marker
pub const SENTINEL: u8 = b',';

/// Most digit slots any layout carries
pub const MAX_DIGITS: usize = 4;

/// Longest frame on the wire (4 digits + count + tag + sentinel)
pub const MAX_FRAME_LEN: usize = MAX_DIGITS + 3;

/// Mode tag sent while ranging
pub const TAG_RANGING: u8 = b'D';

/// Mode tag sent while measuring tilt
pub const TAG_TILT: u8 = b'A';

/// Errors that can occur during frame encoding or strict decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Value needs more digits than the layout has slots
    ValueTooWide,
    /// Requested digit count is outside 1..=slots
    DigitCountOutOfRange,
    /// Layout carries a mode tag but none was supplied
    MissingModeTag,
    /// Received frame length does not match the layout
    LengthMismatch,
    /// Count tag is not a digit the layout can hold
    InvalidDigitCount,
    /// A significant slot holds a non-digit byte
    InvalidDigit,
    /// Mode tag is not one of the known tags
    UnknownModeTag,
}

/// Fixed slot arrangement shared by both ends of the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameLayout {
    digit_slots: u8,
    mode_tag: bool,
}

impl FrameLayout {
    /// 3 digits + count + sentinel; distance-only link (5 bytes)
    pub const RANGING: Self = Self {
        digit_slots: 3,
        mode_tag: false,
    };

    /// 4 digits + count + sentinel; raw ADC link (6 bytes)
    pub const RAW: Self = Self {
        digit_slots: 4,
        mode_tag: false,
    };

    /// 4 digits + count + mode tag + sentinel; combined ranging/tilt link (7 bytes)
    pub const TELEMETRY: Self = Self {
        digit_slots: 4,
        mode_tag: true,
    };

    /// Build a custom layout; `None` if `digit_slots` is not 1-4
    pub const fn new(digit_slots: u8, mode_tag: bool) -> Option<Self> {
        if digit_slots == 0 || digit_slots as usize > MAX_DIGITS {
            return None;
        }
        Some(Self {
            digit_slots,
            mode_tag,
        })
    }

    /// Number of digit slots
    pub const fn digit_slots(&self) -> u8 {
        self.digit_slots
    }

    /// Whether a mode tag slot follows the count
    pub const fn has_mode_tag(&self) -> bool {
        self.mode_tag
    }

    /// Total bytes on the wire, sentinel included
    pub const fn len(&self) -> usize {
        self.digit_slots as usize + 1 + self.mode_tag as usize + 1
    }

    /// Index of the count tag
    pub const fn count_slot(&self) -> usize {
        self.digit_slots as usize
    }

    /// Index of the mode tag, if the layout has one
    pub const fn tag_slot(&self) -> Option<usize> {
        if self.mode_tag {
            Some(self.digit_slots as usize + 1)
        } else {
            None
        }
    }

    /// Largest value the digit slots can carry
    pub const fn max_value(&self) -> u32 {
        let mut max = 1u32;
        let mut i = 0;
        while i < self.digit_slots {
            max *= 10;
            i += 1;
        }
        max - 1
    }
}

/// Number of significant digits for a value: >999 → 4, >99 → 3, >9 → 2, else 1
pub const fn digit_count(value: u32) -> u8 {
    if value > 999 {
        4
    } else if value > 99 {
        3
    } else if value > 9 {
        2
    } else {
        1
    }
}

/// An encoded frame ready to hand to the transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; MAX_FRAME_LEN],
    layout: FrameLayout,
}

impl Frame {
    /// Encode `value` with an explicit significant-digit count.
    ///
    /// Every digit slot is written (leading zeros beyond `digits`), which the
    /// receiver ignores by the count tag.
    pub fn encode(
        layout: FrameLayout,
        value: u32,
        digits: u8,
        mode_tag: Option<u8>,
    ) -> Result<Self, FrameError> {
        if value > layout.max_value() {
            return Err(FrameError::ValueTooWide);
        }
        if digits == 0 || digits > layout.digit_slots {
            return Err(FrameError::DigitCountOutOfRange);
        }

        let mut bytes = [0u8; MAX_FRAME_LEN];
        let mut rest = value;
        for slot in bytes.iter_mut().take(layout.digit_slots as usize) {
            *slot = (rest % 10) as u8 + b'0';
            rest /= 10;
        }

        bytes[layout.count_slot()] = digits + b'0';

        if let Some(tag_slot) = layout.tag_slot() {
            bytes[tag_slot] = mode_tag.ok_or(FrameError::MissingModeTag)?;
        }

        bytes[layout.len() - 1] = SENTINEL;

        Ok(Self { bytes, layout })
    }

    /// Encode `value` with the digit count derived from its magnitude
    pub fn encode_value(
        layout: FrameLayout,
        value: u32,
        mode_tag: Option<u8>,
    ) -> Result<Self, FrameError> {
        Self::encode(layout, value, digit_count(value), mode_tag)
    }

    /// Decode wire bytes (sentinel optional) by slot position
    pub fn decode(
        layout: FrameLayout,
        wire: &[u8],
        policy: IntegrityPolicy,
    ) -> Result<DecodedFrame, FrameError> {
        RawFrame::from_wire(wire).decode(layout, policy)
    }

    /// Wire bytes, sentinel included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.layout.len()]
    }

    /// Layout this frame was encoded with
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }
}

/// How much the decoder trusts the received bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrityPolicy {
    /// Positional decode, nothing validated; an unknown count shows as blank
    #[default]
    Permissive,
    /// Reject frames with a bad length, count, digit or mode tag
    Strict,
}

/// Receive buffer contents captured at the sentinel
///
/// Slots past `received` still hold whatever the previous frame left there,
/// exactly as the receive buffer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    /// Receive buffer snapshot (sentinel not stored)
    pub bytes: [u8; MAX_FRAME_LEN],
    /// Bytes written since the previous sentinel
    pub received: usize,
}

impl RawFrame {
    /// Build a snapshot from wire bytes, stopping at the first sentinel
    pub fn from_wire(wire: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_FRAME_LEN];
        let mut received = 0;
        for &byte in wire.iter().take_while(|&&b| b != SENTINEL) {
            if received >= MAX_FRAME_LEN {
                break;
            }
            bytes[received] = byte;
            received += 1;
        }
        Self { bytes, received }
    }

    /// Decode by slot position
    pub fn decode(
        &self,
        layout: FrameLayout,
        policy: IntegrityPolicy,
    ) -> Result<DecodedFrame, FrameError> {
        let mut digits = [b'0'; MAX_DIGITS];
        digits[..layout.digit_slots as usize]
            .copy_from_slice(&self.bytes[..layout.digit_slots as usize]);

        let count_byte = self.bytes[layout.count_slot()];
        let digit_count = match count_byte {
            b'1'..=b'9' if count_byte - b'0' <= layout.digit_slots => Some(count_byte - b'0'),
            _ => None,
        };

        let mode_tag = layout.tag_slot().map(|slot| self.bytes[slot]);

        let decoded = DecodedFrame {
            digits,
            digit_count,
            mode_tag,
        };

        if policy == IntegrityPolicy::Strict {
            decoded.validate(layout, self.received)?;
        }

        Ok(decoded)
    }
}

/// A frame decoded on the display node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedFrame {
    /// ASCII digits, least-significant first
    pub digits: [u8; MAX_DIGITS],
    /// Declared digit count, `None` if the tag was not recognised
    pub digit_count: Option<u8>,
    /// Raw mode tag byte, if the layout has one
    pub mode_tag: Option<u8>,
}

impl DecodedFrame {
    /// Significant digits, least-significant first; empty for an unknown count
    pub fn active_digits(&self) -> &[u8] {
        match self.digit_count {
            Some(count) => &self.digits[..count as usize],
            None => &[],
        }
    }

    /// Numeric value of the significant digits, if they are all ASCII digits
    pub fn value(&self) -> Option<u32> {
        self.digit_count?;
        self.active_digits()
            .iter()
            .rev()
            .try_fold(0u32, |acc, &b| {
                b.is_ascii_digit().then(|| acc * 10 + (b - b'0') as u32)
            })
    }

    fn validate(&self, layout: FrameLayout, received: usize) -> Result<(), FrameError> {
        if received != layout.len() - 1 {
            return Err(FrameError::LengthMismatch);
        }
        if self.digit_count.is_none() {
            return Err(FrameError::InvalidDigitCount);
        }
        if !self.active_digits().iter().all(u8::is_ascii_digit) {
            return Err(FrameError::InvalidDigit);
        }
        match self.mode_tag {
            None | Some(TAG_RANGING) | Some(TAG_TILT) => Ok(()),
            Some(_) => Err(FrameError::UnknownModeTag),
        }
    }
}
