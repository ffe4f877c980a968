//! Test doubles shared by the driver tests

use echolink_hal::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// Delay that only records how long it was asked to wait
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: u32,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}

/// Output pin that counts rising transitions
#[derive(Default)]
pub struct MockPin {
    pub high: bool,
    pub rises: u32,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        if !self.high {
            self.rises += 1;
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
