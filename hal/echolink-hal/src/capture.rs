//! Timer input-capture abstraction
//!
//! A capture channel latches the free-running timer count on each edge of
//! the echo input. The pulse logic (which edge is which, wraparound) lives in
//! `echolink-core`; this trait is the boundary the trigger routine polls.

/// Progress of the current capture cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureStatus {
    /// Armed, falling edge not yet seen
    Pending,
    /// Both edges latched; elapsed timer ticks
    Complete(u32),
}

/// Dual-edge capture channel on the echo input
pub trait EdgeCapture {
    /// Clear the timer and edge state before a new trigger
    fn arm(&mut self);

    /// Poll the current cycle
    fn status(&mut self) -> CaptureStatus;

    /// Last completed travel time, even if the current cycle never finished
    fn last_travel_ticks(&self) -> u32;
}
