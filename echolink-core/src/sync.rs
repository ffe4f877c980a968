//! State shared with interrupt context
//!
//! Every cross-context value lives in an [`IsrCell`] with one writer in
//! interrupt context and one reader (or hand-off) in the main loop. Access is
//! only possible inside [`IsrCell::with`], which runs the closure with
//! interrupts disabled and restores them on every exit path.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Critical-section protected cell, usable from a `static`
pub struct IsrCell<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<T>>,
}

impl<T> IsrCell<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` on the value inside a critical section.
    ///
    /// Must not be nested on the same cell.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<T: Copy> IsrCell<T> {
    /// Copy the value out
    pub fn get(&self) -> T {
        self.with(|value| *value)
    }

    /// Replace the value
    pub fn set(&self, value: T) {
        self.with(|slot| *slot = value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{EchoOutcome, EchoPolicy, PulseCapture, TimerWidth};
    use echolink_protocol::{FrameLayout, RxAssembler, RxEvent};

    static CAPTURE: IsrCell<PulseCapture> =
        IsrCell::new(PulseCapture::new(TimerWidth::Bits16, EchoPolicy::RetainStale));

    #[test]
    fn test_static_capture_handoff() {
        CAPTURE.with(|cap| cap.arm());
        CAPTURE.with(|cap| cap.on_edge(10));
        CAPTURE.with(|cap| cap.on_edge(590));
        assert_eq!(CAPTURE.with(|cap| cap.outcome()), EchoOutcome::Fresh(580));
    }

    #[test]
    fn test_rx_take_is_atomic() {
        let rx = IsrCell::new(RxAssembler::new(FrameLayout::RANGING));
        for &byte in b"7423" {
            rx.with(|rx| rx.on_byte(byte));
        }
        assert_eq!(rx.with(|rx| rx.on_byte(b',')), RxEvent::FrameReady);

        let frame = rx.with(|rx| rx.take_frame());
        assert!(frame.is_some());
        assert!(rx.with(|rx| rx.is_enabled()));
    }

    #[test]
    fn test_get_set() {
        let cell = IsrCell::new(3u8);
        cell.set(4);
        assert_eq!(cell.get(), 4);
    }
}
