//! PWM tone output
//!
//! The slice counts at 1 MHz (125 MHz system clock / 125), so the tone's
//! period and duty map directly onto `top` and `compare_a`.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use echolink_hal::ToneOutput;
use fixed::traits::ToFixed;

/// System clock divider for 1 µs counter ticks
pub const TICK_DIVIDER: u8 = 125;

/// Build the slice configuration for a tone
pub fn tone_config(period_ticks: u16, duty_ticks: u16) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = TICK_DIVIDER.to_fixed();
    if period_ticks == 0 {
        config.enable = false;
        config.compare_a = 0;
    } else {
        config.top = period_ticks - 1;
        config.compare_a = duty_ticks.min(period_ticks);
    }
    config
}

/// Speaker output on channel A of a PWM slice
pub struct RpTone<'d> {
    pwm: Pwm<'d>,
}

impl<'d> RpTone<'d> {
    pub fn new(pwm: Pwm<'d>) -> Self {
        Self { pwm }
    }
}

impl ToneOutput for RpTone<'_> {
    fn set_tone(&mut self, period_ticks: u16, duty_ticks: u16) {
        self.pwm.set_config(&tone_config(period_ticks, duty_ticks));
    }
}
