//! PWM tone output
//!
//! The alarm speaker is driven by a timer in up-mode with a reset/set output:
//! `period` sets the pitch and `duty` the on-time, both in 1 µs ticks.

/// PWM channel wired to the speaker
pub trait ToneOutput {
    /// Program period and duty in 1 µs ticks. A zero period silences the output.
    fn set_tone(&mut self, period_ticks: u16, duty_ticks: u16);
}
