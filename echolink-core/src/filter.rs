//! Moving-average window and dead-band suppression
//!
//! Each measurement channel owns one [`FilterWindow`]. The dead-band keeps the
//! reported value steady while the averaged reading jitters by a few counts.

/// Window depth used by every channel unless configured otherwise
pub const DEFAULT_DEPTH: usize = 10;

/// Most bands a [`DeadBand`] can hold
pub const MAX_BANDS: usize = 4;

/// Fixed-capacity ring of the last `N` samples
#[derive(Debug, Clone)]
pub struct FilterWindow<const N: usize> {
    samples: [u32; N],
    head: usize,
    count: usize,
}

impl<const N: usize> Default for FilterWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FilterWindow<N> {
    /// Create an empty window
    pub const fn new() -> Self {
        Self {
            samples: [0; N],
            head: 0,
            count: 0,
        }
    }

    /// Insert the newest sample (evicting the oldest when full) and return the mean
    pub fn push(&mut self, raw: u32) -> u32 {
        if N == 0 {
            return raw;
        }
        self.samples[self.head] = raw;
        self.head = (self.head + 1) % N;
        if self.count < N {
            self.count += 1;
        }
        self.mean().unwrap_or(raw)
    }

    /// Integer mean of the samples held, `None` when empty
    pub fn mean(&self) -> Option<u32> {
        if self.count == 0 {
            return None;
        }
        let sum: u64 = self.iter().map(u64::from).sum();
        Some((sum / self.count as u64) as u32)
    }

    /// Number of samples held, at most `N`
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no sample has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    /// Samples held, oldest first
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        let start = (self.head + N - self.count) % N.max(1);
        (0..self.count).map(move |i| self.samples[(start + i) % N])
    }
}

/// One dead-band band: values up to `upper` (inclusive) use `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub upper: u32,
    pub threshold: u32,
}

/// Magnitude-dependent hysteresis
///
/// Bands are ordered by `upper`; a value above every band uses the last band's
/// threshold. A threshold of 0 disables suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadBand {
    bands: [Band; MAX_BANDS],
    len: usize,
}

impl Default for DeadBand {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl DeadBand {
    /// No suppression at all
    pub const DISABLED: Self = Self::uniform(0);

    /// Raw ADC channel: 5 counts up to 700, 7 above
    pub const RAW_ADC: Self = Self {
        bands: [
            Band {
                upper: 700,
                threshold: 5,
            },
            Band {
                upper: u32::MAX,
                threshold: 7,
            },
            Band {
                upper: u32::MAX,
                threshold: 7,
            },
            Band {
                upper: u32::MAX,
                threshold: 7,
            },
        ],
        len: 2,
    };

    /// Same threshold everywhere
    pub const fn uniform(threshold: u32) -> Self {
        let band = Band {
            upper: u32::MAX,
            threshold,
        };
        Self {
            bands: [band; MAX_BANDS],
            len: 1,
        }
    }

    /// Build from ordered bands; `None` if empty, too many or out of order
    pub fn from_bands(bands: &[Band]) -> Option<Self> {
        if bands.is_empty() || bands.len() > MAX_BANDS {
            return None;
        }
        if bands.windows(2).any(|w| w[0].upper >= w[1].upper) {
            return None;
        }
        let last = bands[bands.len() - 1];
        let mut out = [last; MAX_BANDS];
        out[..bands.len()].copy_from_slice(bands);
        Some(Self {
            bands: out,
            len: bands.len(),
        })
    }

    /// Threshold applying to a value of this magnitude
    pub fn threshold_for(&self, value: u32) -> u32 {
        self.bands[..self.len]
            .iter()
            .find(|band| value <= band.upper)
            .unwrap_or(&self.bands[self.len - 1])
            .threshold
    }

    /// Keep `previous` if `candidate` moved less than the threshold
    pub fn apply(&self, previous: Option<u32>, candidate: u32) -> u32 {
        match previous {
            Some(prev) if candidate.abs_diff(prev) < self.threshold_for(candidate) => prev,
            _ => candidate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_partial_window_mean() {
        let mut window: FilterWindow<10> = FilterWindow::new();
        assert_eq!(window.mean(), None);
        assert_eq!(window.push(10), 10);
        assert_eq!(window.push(20), 15);
        assert_eq!(window.push(30), 20);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_full_window_evicts_oldest() {
        let mut window: FilterWindow<3> = FilterWindow::new();
        window.push(100);
        window.push(1);
        window.push(2);
        assert_eq!(window.push(3), 2);
        assert_eq!(window.iter().collect::<heapless::Vec<u32, 3>>().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut window: FilterWindow<4> = FilterWindow::new();
        window.push(8);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.push(2), 2);
    }

    #[test]
    fn test_dead_band_holds_small_moves() {
        let band = DeadBand::uniform(2);
        assert_eq!(band.apply(Some(40), 41), 40);
        assert_eq!(band.apply(Some(40), 42), 42);
        assert_eq!(band.apply(None, 41), 41);
    }

    #[test]
    fn test_raw_adc_bands() {
        let band = DeadBand::RAW_ADC;
        assert_eq!(band.threshold_for(700), 5);
        assert_eq!(band.threshold_for(701), 7);
        assert_eq!(band.apply(Some(500), 504), 500);
        assert_eq!(band.apply(Some(500), 505), 505);
        assert_eq!(band.apply(Some(800), 806), 800);
        assert_eq!(band.apply(Some(800), 807), 807);
    }

    #[test]
    fn test_disabled_passes_everything() {
        let band = DeadBand::DISABLED;
        assert_eq!(band.apply(Some(7), 7), 7);
        assert_eq!(band.apply(Some(7), 8), 8);
    }

    #[test]
    fn test_from_bands_validation() {
        assert!(DeadBand::from_bands(&[]).is_none());
        let unordered = [
            Band { upper: 10, threshold: 1 },
            Band { upper: 5, threshold: 2 },
        ];
        assert!(DeadBand::from_bands(&unordered).is_none());

        let bands = DeadBand::from_bands(&[
            Band { upper: 100, threshold: 1 },
            Band { upper: 200, threshold: 3 },
        ])
        .unwrap();
        assert_eq!(bands.threshold_for(50), 1);
        assert_eq!(bands.threshold_for(150), 3);
        assert_eq!(bands.threshold_for(5000), 3);
    }

    proptest! {
        #[test]
        fn prop_mean_of_last_n(samples in proptest::collection::vec(0u32..=65_535, 1..40)) {
            let mut window: FilterWindow<DEFAULT_DEPTH> = FilterWindow::new();
            let mut last = 0;
            for &s in &samples {
                last = window.push(s);
            }

            let tail = &samples[samples.len().saturating_sub(DEFAULT_DEPTH)..];
            let expected = tail.iter().map(|&s| s as u64).sum::<u64>() / tail.len() as u64;
            prop_assert_eq!(last as u64, expected);
            prop_assert_eq!(window.len(), tail.len());
        }

        #[test]
        fn prop_dead_band_output_is_prev_or_candidate(
            prev in 0u32..1024,
            candidate in 0u32..1024,
            threshold in 0u32..16,
        ) {
            let band = DeadBand::uniform(threshold);
            let out = band.apply(Some(prev), candidate);
            if candidate.abs_diff(prev) < threshold {
                prop_assert_eq!(out, prev);
            } else {
                prop_assert_eq!(out, candidate);
            }
        }
    }
}
