//! Three-axis analog accelerometer (ADXL335 style)
//!
//! Each axis is a ratiometric voltage on its own ADC channel. At rest and
//! level an axis sits near mid-scale; ±1 g moves it by roughly the configured
//! full scale.

use echolink_core::config::TiltConfig;
use echolink_hal::{AdcError, AdcReader};

/// Raw 10-bit axis readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

/// Accelerometer on three ADC channels
pub struct Accelerometer<A> {
    adc: A,
    channels: [u8; 3],
}

impl<A: AdcReader> Accelerometer<A> {
    pub fn new(adc: A, config: &TiltConfig) -> Self {
        Self {
            adc,
            channels: [config.channel_x, config.channel_y, config.channel_z],
        }
    }

    /// Convert all three axes back to back
    pub fn read_axes(&mut self) -> Result<AxisSample, AdcError> {
        let [cx, cy, cz] = self.channels;
        Ok(AxisSample {
            x: self.adc.read_channel(cx)?,
            y: self.adc.read_channel(cy)?,
            z: self.adc.read_channel(cz)?,
        })
    }

    /// Burst of conversions on the X channel, for the raw ADC link
    pub fn read_raw_burst(&mut self, samples: &mut [u16]) -> Result<(), AdcError> {
        self.adc.read_burst(self.channels[0], samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAdc {
        values: [u16; 4],
    }

    impl AdcReader for MockAdc {
        fn read_channel(&mut self, channel: u8) -> Result<u16, AdcError> {
            self.values
                .get(channel as usize)
                .copied()
                .ok_or(AdcError::InvalidChannel)
        }
    }

    #[test]
    fn test_read_axes_by_channel() {
        let config = TiltConfig {
            channel_x: 2,
            channel_y: 0,
            channel_z: 3,
            ..TiltConfig::default()
        };
        let mut accel = Accelerometer::new(
            MockAdc {
                values: [515, 0, 505, 526],
            },
            &config,
        );

        assert_eq!(
            accel.read_axes(),
            Ok(AxisSample {
                x: 505,
                y: 515,
                z: 526
            })
        );
    }

    #[test]
    fn test_raw_burst_reads_x_channel() {
        let config = TiltConfig {
            channel_x: 3,
            ..TiltConfig::default()
        };
        let mut accel = Accelerometer::new(
            MockAdc {
                values: [1, 2, 3, 1017],
            },
            &config,
        );
        let mut samples = [0u16; 8];
        accel.read_raw_burst(&mut samples).unwrap();
        assert_eq!(samples, [1017; 8]);
    }

    #[test]
    fn test_bad_channel_propagates() {
        let config = TiltConfig {
            channel_z: 9,
            ..TiltConfig::default()
        };
        let mut accel = Accelerometer::new(MockAdc { values: [0; 4] }, &config);
        assert_eq!(accel.read_axes(), Err(AdcError::InvalidChannel));
    }
}
