//! ADC channel management
//!
//! RP2040 has a single 12-bit ADC with four external inputs:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! Readings are scaled to 10 bits so calibration constants match the
//! accelerometer's mid-scale values.

use embassy_rp::adc::{Adc, Blocking, Channel};
use echolink_hal::{AdcError, AdcReader};

/// Number of external ADC inputs
pub const CHANNEL_COUNT: usize = 4;

/// ADC channel index for a GPIO, if it has one
pub fn channel_for_gpio(gpio: u8) -> Option<u8> {
    match gpio {
        26..=29 => Some(gpio - 26),
        _ => None,
    }
}

/// Reduce a 12-bit conversion to the 10-bit range
pub const fn to_10bit(raw: u16) -> u16 {
    (raw & 0x0FFF) >> 2
}

/// Blocking ADC with up to four bound channels
pub struct RpAdc<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Option<Channel<'d>>; CHANNEL_COUNT],
}

impl<'d> RpAdc<'d> {
    pub fn new(adc: Adc<'d, Blocking>) -> Self {
        Self {
            adc,
            channels: [None, None, None, None],
        }
    }

    /// Bind a pin's channel to an index; returns self for chaining
    pub fn with_channel(mut self, index: u8, channel: Channel<'d>) -> Self {
        if let Some(slot) = self.channels.get_mut(index as usize) {
            *slot = Some(channel);
        }
        self
    }
}

impl AdcReader for RpAdc<'_> {
    fn read_channel(&mut self, channel: u8) -> Result<u16, AdcError> {
        let ch = self
            .channels
            .get_mut(channel as usize)
            .and_then(Option::as_mut)
            .ok_or(AdcError::InvalidChannel)?;
        self.adc
            .blocking_read(ch)
            .map(to_10bit)
            .map_err(|_| AdcError::ConversionFailed)
    }
}
