//! Byte-per-event transmit and receive state machines.
//!
//! Both sides are driven one byte at a time by the UART interrupt (or the task
//! standing in for it), so neither type blocks or allocates.

use crate::frame::{Frame, FrameLayout, RawFrame, MAX_FRAME_LEN, SENTINEL};

/// Result of arming the transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmOutcome {
    /// Transmitter was idle
    Started,
    /// A frame was still in flight and has been restarted from byte 0
    Preempted,
}

/// Transmit side: hands out one frame byte per TX-ready event
#[derive(Debug, Clone)]
pub struct TxPump {
    buffer: [u8; MAX_FRAME_LEN],
    len: usize,
    index: usize,
    enabled: bool,
}

impl Default for TxPump {
    fn default() -> Self {
        Self::new()
    }
}

impl TxPump {
    /// Create an idle transmitter
    pub const fn new() -> Self {
        Self {
            buffer: [0; MAX_FRAME_LEN],
            len: 0,
            index: 0,
            enabled: false,
        }
    }

    /// Load a frame and enable transmit-ready events
    pub fn arm(&mut self, frame: &Frame) -> ArmOutcome {
        let outcome = if self.enabled {
            ArmOutcome::Preempted
        } else {
            ArmOutcome::Started
        };

        let bytes = frame.as_bytes();
        self.buffer[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();
        self.index = 0;
        self.enabled = true;

        outcome
    }

    /// Next byte to transmit, or `None` once the frame is out.
    ///
    /// Disables itself after handing out the last byte.
    pub fn next_byte(&mut self) -> Option<u8> {
        if !self.enabled {
            return None;
        }

        let byte = self.buffer[self.index];
        self.index += 1;
        if self.index >= self.len {
            self.index = 0;
            self.enabled = false;
        }
        Some(byte)
    }

    /// Whether a frame is still in flight
    pub fn is_busy(&self) -> bool {
        self.enabled
    }
}

/// What a received byte did to the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxEvent {
    /// Byte stored in the buffer
    Stored,
    /// Sentinel seen; a frame is ready and receive is paused
    FrameReady,
    /// Buffer was full; index reset and the byte discarded
    Overrun,
    /// Receive is paused until the pending frame is taken
    Ignored,
}

/// Receive side: collects bytes up to the sentinel
#[derive(Debug, Clone)]
pub struct RxAssembler {
    buffer: [u8; MAX_FRAME_LEN],
    capacity: usize,
    index: usize,
    received: usize,
    ready: bool,
    enabled: bool,
}

impl RxAssembler {
    /// Create an assembler sized to one frame of `layout`
    pub const fn new(layout: FrameLayout) -> Self {
        Self {
            buffer: [0; MAX_FRAME_LEN],
            capacity: layout.len(),
            index: 0,
            received: 0,
            ready: false,
            enabled: true,
        }
    }

    /// Handle one RX-ready event
    pub fn on_byte(&mut self, byte: u8) -> RxEvent {
        if !self.enabled {
            return RxEvent::Ignored;
        }

        if self.index >= self.capacity {
            self.index = 0;
            return RxEvent::Overrun;
        }

        if byte == SENTINEL {
            self.received = self.index;
            self.index = 0;
            self.ready = true;
            self.enabled = false;
            return RxEvent::FrameReady;
        }

        self.buffer[self.index] = byte;
        self.index += 1;
        RxEvent::Stored
    }

    /// Whether a complete frame is waiting
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether receive events are currently accepted
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current write position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Copy out the pending frame and re-enable receive in one step
    pub fn take_frame(&mut self) -> Option<RawFrame> {
        if !self.ready {
            return None;
        }

        let frame = RawFrame {
            bytes: self.buffer,
            received: self.received,
        };
        self.ready = false;
        self.enabled = true;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{IntegrityPolicy, TAG_TILT};

    fn pump_all(tx: &mut TxPump, rx: &mut RxAssembler) -> Option<RxEvent> {
        let mut last = None;
        while let Some(byte) = tx.next_byte() {
            last = Some(rx.on_byte(byte));
        }
        last
    }

    #[test]
    fn test_tx_sends_frame_then_disables() {
        let frame = Frame::encode(FrameLayout::RANGING, 247, 3, None).unwrap();
        let mut tx = TxPump::new();
        assert_eq!(tx.arm(&frame), ArmOutcome::Started);

        let mut sent = [0u8; 8];
        let mut n = 0;
        while let Some(byte) = tx.next_byte() {
            sent[n] = byte;
            n += 1;
        }

        assert_eq!(&sent[..n], b"7423,");
        assert!(!tx.is_busy());
        assert_eq!(tx.next_byte(), None);
    }

    #[test]
    fn test_tx_rearm_restarts_from_zero() {
        let first = Frame::encode_value(FrameLayout::RANGING, 123, None).unwrap();
        let second = Frame::encode_value(FrameLayout::RANGING, 456, None).unwrap();
        let mut tx = TxPump::new();

        tx.arm(&first);
        tx.next_byte();
        tx.next_byte();

        assert_eq!(tx.arm(&second), ArmOutcome::Preempted);
        assert_eq!(tx.next_byte(), Some(b'6'));
    }

    #[test]
    fn test_rx_assembles_frame_and_pauses() {
        let frame = Frame::encode_value(FrameLayout::TELEMETRY, 1204, Some(TAG_TILT)).unwrap();
        let mut tx = TxPump::new();
        let mut rx = RxAssembler::new(FrameLayout::TELEMETRY);

        tx.arm(&frame);
        assert_eq!(pump_all(&mut tx, &mut rx), Some(RxEvent::FrameReady));
        assert!(rx.is_ready());
        assert!(!rx.is_enabled());
        assert_eq!(rx.index(), 0);

        // Paused until the frame is taken
        assert_eq!(rx.on_byte(b'9'), RxEvent::Ignored);

        let raw = rx.take_frame().unwrap();
        assert!(rx.is_enabled());
        assert!(!rx.is_ready());

        let decoded = raw
            .decode(FrameLayout::TELEMETRY, IntegrityPolicy::Strict)
            .unwrap();
        assert_eq!(decoded.value(), Some(1204));
        assert_eq!(decoded.mode_tag, Some(TAG_TILT));
    }

    #[test]
    fn test_take_frame_without_ready() {
        let mut rx = RxAssembler::new(FrameLayout::RANGING);
        assert_eq!(rx.take_frame(), None);
    }

    #[test]
    fn test_rx_overrun_resets_index() {
        let layout = FrameLayout::RANGING;
        let mut rx = RxAssembler::new(layout);

        for _ in 0..layout.len() {
            assert_eq!(rx.on_byte(b'1'), RxEvent::Stored);
        }
        assert_eq!(rx.index(), layout.len());

        assert_eq!(rx.on_byte(b'1'), RxEvent::Overrun);
        assert_eq!(rx.index(), 0);
        assert!(!rx.is_ready());
    }

    #[test]
    fn test_rx_recovers_after_overrun() {
        let layout = FrameLayout::RANGING;
        let mut rx = RxAssembler::new(layout);

        for _ in 0..=layout.len() {
            rx.on_byte(b'8');
        }

        for &byte in b"5001," {
            rx.on_byte(byte);
        }
        let decoded = rx
            .take_frame()
            .unwrap()
            .decode(layout, IntegrityPolicy::Strict)
            .unwrap();
        assert_eq!(decoded.value(), Some(5));
    }
}
