//! Alarm speaker
//!
//! Piezo or small speaker on a PWM channel. Each alarm level plays a fixed
//! note; level 0 stops the output.

use echolink_core::alarm::{Tone, ToneTable};
use echolink_hal::ToneOutput;

/// Speaker driven through a tone table
pub struct Speaker<T> {
    output: T,
    table: ToneTable,
    level: u8,
}

impl<T: ToneOutput> Speaker<T> {
    /// Create a silent speaker
    pub fn new(mut output: T, table: ToneTable) -> Self {
        output.set_tone(0, 0);
        Self {
            output,
            table,
            level: 0,
        }
    }

    /// Play the note for an alarm level; returns the tone programmed
    pub fn set_level(&mut self, level: u8) -> Tone {
        let tone = self.table.tone(level);
        self.output.set_tone(tone.period, tone.duty);
        self.level = level;
        tone
    }

    /// Stop the output
    pub fn silence(&mut self) {
        self.set_level(0);
    }

    /// Level currently playing
    pub fn level(&self) -> u8 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPwm {
        period: u16,
        duty: u16,
        writes: u32,
    }

    impl ToneOutput for MockPwm {
        fn set_tone(&mut self, period_ticks: u16, duty_ticks: u16) {
            self.period = period_ticks;
            self.duty = duty_ticks;
            self.writes += 1;
        }
    }

    #[test]
    fn test_starts_silent() {
        let speaker = Speaker::new(MockPwm::default(), ToneTable::NOTES);
        assert_eq!(speaker.level(), 0);
        assert_eq!(speaker.output.writes, 1);
        assert_eq!(speaker.output.period, 0);
    }

    #[test]
    fn test_level_programs_pwm() {
        let mut speaker = Speaker::new(MockPwm::default(), ToneTable::NOTES);
        speaker.set_level(3);
        assert_eq!(speaker.output.period, 2272);
        assert_eq!(speaker.output.duty, 1136);

        speaker.silence();
        assert_eq!(speaker.output.period, 0);
        assert_eq!(speaker.output.duty, 0);
        assert_eq!(speaker.level(), 0);
    }
}
