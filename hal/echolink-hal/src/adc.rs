//! Analog sampling abstraction
//!
//! Mirrors the "select channel, start conversion, wait for busy to clear,
//! read result" sequence. Implementations block in the caller's context.

/// ADC read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel index not wired on this board
    InvalidChannel,
    /// Conversion did not complete
    ConversionFailed,
}

/// Multi-channel ADC
pub trait AdcReader {
    /// Convert one channel and return the result scaled to 10 bits (0-1023)
    fn read_channel(&mut self, channel: u8) -> Result<u16, AdcError>;

    /// Fill `samples` with back-to-back conversions of one channel
    fn read_burst(&mut self, channel: u8, samples: &mut [u16]) -> Result<(), AdcError> {
        for sample in samples.iter_mut() {
            *sample = self.read_channel(channel)?;
        }
        Ok(())
    }
}
