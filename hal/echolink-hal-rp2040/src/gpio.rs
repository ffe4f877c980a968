//! GPIO wrappers
//!
//! Thin newtypes over `embassy_rp::gpio` so the drivers only see the
//! `echolink-hal` traits. Inputs also forward the async edge waits the
//! button driver needs.

use core::convert::Infallible;

use embassy_rp::gpio::{Input, Output};
use echolink_hal::{InputPin, OutputPin};

/// Push-pull output (trigger, digit selects)
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input (strap, buttons)
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl embedded_hal::digital::ErrorType for RpInput<'_> {
    type Error = Infallible;
}

impl embedded_hal_async::digital::Wait for RpInput<'_> {
    async fn wait_for_high(&mut self) -> Result<(), Infallible> {
        self.0.wait_for_high().await;
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Infallible> {
        self.0.wait_for_low().await;
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
        self.0.wait_for_rising_edge().await;
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
        self.0.wait_for_falling_edge().await;
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
        self.0.wait_for_any_edge().await;
        Ok(())
    }
}
