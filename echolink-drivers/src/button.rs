//! Debounced push-button
//!
//! Buttons are wired to ground with the internal pull-up, so a press is a
//! falling edge. After an edge the driver waits a fixed settle time and
//! re-reads the pin; a bounce that has already released is ignored.

use echolink_hal::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;

/// Push-button with edge wait and settle-and-confirm debounce
pub struct DebouncedButton<P, D> {
    pin: P,
    delay: D,
    debounce_ms: u32,
    active_low: bool,
}

impl<P: InputPin + Wait, D: DelayNs> DebouncedButton<P, D> {
    pub fn new(pin: P, delay: D, debounce_ms: u32, active_low: bool) -> Self {
        Self {
            pin,
            delay,
            debounce_ms,
            active_low,
        }
    }

    /// Whether the button currently reads pressed
    pub fn is_pressed(&self) -> bool {
        self.pin.is_high() != self.active_low
    }

    /// Wait for the settle time, then confirm the pin still reads pressed
    pub async fn confirm(&mut self) -> bool {
        self.delay.delay_ms(self.debounce_ms).await;
        self.is_pressed()
    }

    /// Wait until a press survives the debounce
    pub async fn wait_for_press(&mut self) -> Result<(), P::Error> {
        loop {
            if self.active_low {
                self.pin.wait_for_falling_edge().await?;
            } else {
                self.pin.wait_for_rising_edge().await?;
            }
            if self.confirm().await {
                return Ok(());
            }
        }
    }
}
