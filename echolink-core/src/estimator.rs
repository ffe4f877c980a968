//! Distance and tilt estimators
//!
//! Raw samples go through a per-channel moving average and dead-band before
//! they are turned into centimetres or degrees.

use crate::config::{SensorConfig, TiltConfig};
use crate::filter::{DeadBand, FilterWindow, DEFAULT_DEPTH};

/// Right angle, the largest tilt reported
pub const MAX_ANGLE_DEG: u16 = 90;

/// Conversions averaged into one raw ADC reading
pub const RAW_BURST: usize = 32;

/// Largest 10-bit conversion
pub const ADC_FULL_SCALE: u32 = 1023;

/// Averages at or above this read as full scale
pub const ADC_TOP_EDGE: u32 = 1015;

/// One filtered measurement channel
#[derive(Debug, Clone)]
pub struct Estimator<const N: usize = DEFAULT_DEPTH> {
    window: FilterWindow<N>,
    dead_band: DeadBand,
    last: Option<u32>,
}

impl<const N: usize> Estimator<N> {
    /// Create a channel with the given dead-band
    pub const fn new(dead_band: DeadBand) -> Self {
        Self {
            window: FilterWindow::new(),
            dead_band,
            last: None,
        }
    }

    /// Push a raw sample; returns the averaged, dead-banded value
    pub fn push_sample(&mut self, raw: u32) -> u32 {
        let mean = self.window.push(raw);
        let value = self.dead_band.apply(self.last, mean);
        self.last = Some(value);
        value
    }

    /// Last value returned, if any
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Forget history
    pub fn reset(&mut self) {
        self.window.clear();
        self.last = None;
    }
}

/// Ticks → centimetres with averaging and clamping
///
/// The mean is clamped before the dead-band so the held value is always one
/// that was actually reported.
#[derive(Debug, Clone)]
pub struct DistanceEstimator {
    window: FilterWindow<DEFAULT_DEPTH>,
    dead_band: DeadBand,
    last: Option<u32>,
    ticks_per_cm: u32,
    max_distance_cm: u16,
}

impl DistanceEstimator {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            window: FilterWindow::new(),
            dead_band: DeadBand::uniform(config.dead_band_cm as u32),
            last: None,
            ticks_per_cm: config.ticks_per_cm.max(1),
            max_distance_cm: config.max_distance_cm,
        }
    }

    /// Convert a travel time, filter it and clamp to the sensor's range
    pub fn push_ticks(&mut self, ticks: u32) -> u16 {
        let mean = self.window.push(ticks / self.ticks_per_cm);
        let clamped = mean.min(self.max_distance_cm as u32);
        let cm = self.dead_band.apply(self.last, clamped);
        self.last = Some(cm);
        cm as u16
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.last = None;
    }
}

/// Burst-averaged reading of one ADC channel
///
/// Each reading is the mean of a burst of conversions. A zero mean and a mean
/// at or above [`ADC_TOP_EDGE`] bypass the dead-band so both ends of the
/// scale stay reachable.
#[derive(Debug, Clone)]
pub struct RawAdcEstimator {
    burst: FilterWindow<RAW_BURST>,
    dead_band: DeadBand,
    last: Option<u32>,
}

impl Default for RawAdcEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl RawAdcEstimator {
    pub const fn new() -> Self {
        Self {
            burst: FilterWindow::new(),
            dead_band: DeadBand::RAW_ADC,
            last: None,
        }
    }

    /// Average one burst of conversions; an empty burst repeats the last value
    pub fn push_burst(&mut self, samples: &[u16]) -> u16 {
        self.burst.clear();
        for &sample in samples.iter().take(RAW_BURST) {
            self.burst.push(sample as u32);
        }
        let Some(mean) = self.burst.mean() else {
            return self.last.unwrap_or(0) as u16;
        };

        let value = match mean {
            0 => 0,
            m if m >= ADC_TOP_EDGE => ADC_FULL_SCALE,
            m => self.dead_band.apply(self.last, m),
        };
        self.last = Some(value);
        value as u16
    }

    pub fn reset(&mut self) {
        self.burst.clear();
        self.last = None;
    }
}

/// Whole-degree tilt per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltReading {
    pub angle_x: u16,
    pub angle_y: u16,
    pub angle_z: u16,
}

impl TiltReading {
    /// X and Y packed for a four-digit display: `XXYY`
    pub fn combined(&self) -> u16 {
        self.angle_x * 100 + self.angle_y
    }
}

/// Accelerometer axes → tilt angles
#[derive(Debug, Clone)]
pub struct TiltEstimator {
    axes: [Estimator; 3],
    zero: [u16; 3],
    full_scale: u16,
}

impl TiltEstimator {
    pub fn new(config: &TiltConfig) -> Self {
        let dead_band = DeadBand::uniform(config.dead_band as u32);
        Self {
            axes: [
                Estimator::new(dead_band),
                Estimator::new(dead_band),
                Estimator::new(dead_band),
            ],
            zero: [config.zero_x, config.zero_y, config.zero_z],
            full_scale: config.full_scale.max(1),
        }
    }

    /// Filter one reading per axis and convert each to an angle
    pub fn push_axes(&mut self, x: u16, y: u16, z: u16) -> TiltReading {
        let mut angles = [0u16; 3];
        for (i, raw) in [x, y, z].into_iter().enumerate() {
            let avg = self.axes[i].push_sample(raw as u32);
            let deviation = avg.abs_diff(self.zero[i] as u32);
            angles[i] = angle_deg(deviation, self.full_scale);
        }
        TiltReading {
            angle_x: angles[0],
            angle_y: angles[1],
            angle_z: angles[2],
        }
    }

    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
    }
}

/// `asin(deviation / full_scale)` in whole degrees, truncated.
///
/// Single-precision `asinf`, scaled by 180 in `f32` and by 1/π in `f64`.
/// A deviation at or past full scale is exactly 90.
pub fn angle_deg(deviation: u32, full_scale: u16) -> u16 {
    if deviation >= full_scale as u32 {
        return MAX_ANGLE_DEG;
    }
    let ratio = deviation as f32 / full_scale as f32;
    let scaled = libm::asinf(ratio) * 180.0;
    let degrees = scaled as f64 * core::f64::consts::FRAC_1_PI;
    (degrees.max(0.0) as u16).min(MAX_ANGLE_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_dead_band() {
        let mut est: Estimator<1> = Estimator::new(DeadBand::uniform(2));
        assert_eq!(est.push_sample(100), 100);
        assert_eq!(est.push_sample(101), 100);
        assert_eq!(est.push_sample(102), 102);
        assert_eq!(est.last(), Some(102));
    }

    #[test]
    fn test_distance_zero() {
        let mut est = DistanceEstimator::new(&SensorConfig::default());
        assert_eq!(est.push_ticks(0), 0);
    }

    #[test]
    fn test_distance_clamps_at_400() {
        let mut est = DistanceEstimator::new(&SensorConfig::default());
        // 401 cm worth of ticks
        assert_eq!(est.push_ticks(401 * 58), 400);
        for _ in 0..20 {
            assert_eq!(est.push_ticks(60_000), 400);
        }
    }

    #[test]
    fn test_distance_averages() {
        let mut est = DistanceEstimator::new(&SensorConfig::default());
        assert_eq!(est.push_ticks(100 * 58), 100);
        assert_eq!(est.push_ticks(200 * 58), 150);
    }

    #[test]
    fn test_angle_bounds() {
        assert_eq!(angle_deg(0, 97), 0);
        assert_eq!(angle_deg(97, 97), 90);
        assert_eq!(angle_deg(150, 97), 90);
    }

    #[test]
    fn test_distance_dead_band_holds_clamped_value() {
        let config = SensorConfig {
            dead_band_cm: 5,
            ..SensorConfig::default()
        };
        let mut est = DistanceEstimator::new(&config);
        assert_eq!(est.push_ticks(404 * 58), 400);
        // mean 398 is within 5 of the reported 400
        assert_eq!(est.push_ticks(392 * 58), 400);
    }

    #[test]
    fn test_distance_reset_forgets_held_value() {
        let config = SensorConfig {
            dead_band_cm: 5,
            ..SensorConfig::default()
        };
        let mut est = DistanceEstimator::new(&config);
        assert_eq!(est.push_ticks(100 * 58), 100);
        est.reset();
        assert_eq!(est.push_ticks(102 * 58), 102);
    }

    #[test]
    fn test_raw_adc_burst_average() {
        let mut est = RawAdcEstimator::new();
        let burst = [500u16; RAW_BURST];
        assert_eq!(est.push_burst(&burst), 500);

        let mut mixed = [600u16; RAW_BURST];
        mixed[..RAW_BURST / 2].fill(400);
        // mean 500, held
        assert_eq!(est.push_burst(&mixed), 500);
    }

    #[test]
    fn test_raw_adc_dead_band_bands() {
        let mut est = RawAdcEstimator::new();
        assert_eq!(est.push_burst(&[300; RAW_BURST]), 300);
        assert_eq!(est.push_burst(&[304; RAW_BURST]), 300);
        assert_eq!(est.push_burst(&[305; RAW_BURST]), 305);

        assert_eq!(est.push_burst(&[800; RAW_BURST]), 800);
        assert_eq!(est.push_burst(&[806; RAW_BURST]), 800);
        assert_eq!(est.push_burst(&[807; RAW_BURST]), 807);
    }

    #[test]
    fn test_raw_adc_edges() {
        let mut est = RawAdcEstimator::new();
        assert_eq!(est.push_burst(&[3; RAW_BURST]), 3);
        // zero is reported even inside the dead-band
        assert_eq!(est.push_burst(&[0; RAW_BURST]), 0);

        assert_eq!(est.push_burst(&[1012; RAW_BURST]), 1012);
        // top edge snaps to full scale even inside the dead-band
        assert_eq!(est.push_burst(&[1015; RAW_BURST]), 1023);
        assert_eq!(est.push_burst(&[1020; RAW_BURST]), 1023);
    }

    #[test]
    fn test_raw_adc_empty_burst_repeats() {
        let mut est = RawAdcEstimator::new();
        assert_eq!(est.push_burst(&[]), 0);
        assert_eq!(est.push_burst(&[250; 4]), 250);
        assert_eq!(est.push_burst(&[]), 250);
        est.reset();
        assert_eq!(est.push_burst(&[]), 0);
    }

    #[test]
    fn test_angle_midrange() {
        assert_eq!(angle_deg(50, 100), 30);
    }

    #[test]
    fn test_angle_table_full_scale_97() {
        // asinf(d / 97) * 180 / π, truncated
        const EXPECTED: [u16; 98] = [
            0, 0, 1, 1, 2, 2, 3, 4, 4, 5, 5, 6, 7, 7, 8, 8, 9, 10, 10, 11, 11, 12, 13, 13, 14,
            14, 15, 16, 16, 17, 18, 18, 19, 19, 20, 21, 21, 22, 23, 23, 24, 25, 25, 26, 26, 27,
            28, 28, 29, 30, 31, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 38, 39, 40, 41, 42, 42,
            43, 44, 45, 46, 47, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 61, 62, 63,
            65, 66, 68, 69, 71, 73, 75, 78, 81, 90,
        ];
        for (deviation, &expected) in EXPECTED.iter().enumerate() {
            assert_eq!(
                angle_deg(deviation as u32, 97),
                expected,
                "deviation {}",
                deviation
            );
        }
    }

    #[test]
    fn test_tilt_level_surface() {
        let config = TiltConfig::default();
        let mut est = TiltEstimator::new(&config);
        let reading = est.push_axes(config.zero_x, config.zero_y, config.zero_z);
        assert_eq!(reading, TiltReading::default());
        assert_eq!(reading.combined(), 0);
    }

    #[test]
    fn test_tilt_combined_value() {
        let config = TiltConfig::default();
        let mut est = TiltEstimator::new(&config);
        let reading = est.push_axes(config.zero_x + 200, config.zero_y, config.zero_z);
        assert_eq!(reading.angle_x, 90);
        assert_eq!(reading.angle_y, 0);
        assert_eq!(reading.combined(), 9000);
    }

    #[test]
    fn test_tilt_below_zero_point() {
        let config = TiltConfig::default();
        let mut est = TiltEstimator::new(&config);
        let reading = est.push_axes(config.zero_x, config.zero_y - 97, config.zero_z);
        assert_eq!(reading.angle_y, 90);
    }
}
