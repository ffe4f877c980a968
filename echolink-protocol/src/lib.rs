//! Sensor-to-Display Telemetry Protocol
//!
//! This crate defines the one-way UART link from the sensor node to the
//! display node. A frame is a handful of ASCII bytes terminated by a sentinel:
//! ```text
//! ┌─────────────┬───────┬─────────┬──────────┐
//! │ DIGITS      │ COUNT │ TAG     │ SENTINEL │
//! │ 1–4B (LSD→) │ 1B    │ 0 or 1B │ ','      │
//! └─────────────┴───────┴─────────┴──────────┘
//! ```
//!
//! The transmitter sends one byte per TX-ready event and the receiver stores
//! one byte per RX-ready event, pausing itself at the sentinel until the
//! display task takes the frame.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod transport;

pub use frame::{
    digit_count, DecodedFrame, Frame, FrameError, FrameLayout, IntegrityPolicy, RawFrame,
    MAX_DIGITS, MAX_FRAME_LEN, SENTINEL, TAG_RANGING, TAG_TILT,
};
pub use transport::{ArmOutcome, RxAssembler, RxEvent, TxPump};
