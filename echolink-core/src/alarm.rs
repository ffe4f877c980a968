//! Proximity alarm: distance → level → tone
//!
//! A distance sounds the alarm only when it exactly equals one of five preset
//! distances. The first preset is the loudest (level 5), the last the softest
//! (level 1).

/// Number of preset distances
pub const PRESET_COUNT: usize = 5;

/// Highest alarm level
pub const MAX_LEVEL: u8 = 5;

/// Alternative preset table with evenly spaced close-range steps
pub const SORTED_PRESETS: [u16; PRESET_COUNT] = [5, 10, 15, 20, 25];

/// Level for an exact preset match: index `i` gives `5 - i`, no match gives 0
pub fn level_for(distance: u16, presets: &[u16; PRESET_COUNT]) -> u8 {
    presets
        .iter()
        .position(|&p| p == distance)
        .map_or(0, |i| MAX_LEVEL - i as u8)
}

/// PWM setting in 1 µs timer ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub period: u16,
    pub duty: u16,
}

impl Tone {
    pub const SILENT: Self = Self { period: 0, duty: 0 };

    pub fn is_silent(&self) -> bool {
        self.period == 0
    }
}

/// Tone for each alarm level, square wave at 50% duty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneTable {
    tones: [Tone; MAX_LEVEL as usize],
}

impl Default for ToneTable {
    fn default() -> Self {
        Self::NOTES
    }
}

impl ToneTable {
    /// E2, D3, A4, E5, A6 for levels 1 through 5
    pub const NOTES: Self = Self {
        tones: [
            Tone { period: 12134, duty: 6067 },
            Tone { period: 3405, duty: 1702 },
            Tone { period: 2272, duty: 1136 },
            Tone { period: 1516, duty: 758 },
            Tone { period: 1136, duty: 568 },
        ],
    };

    /// Tone for a level; 0 or anything above 5 is silent
    pub fn tone(&self, level: u8) -> Tone {
        match level {
            1..=MAX_LEVEL => self.tones[level as usize - 1],
            _ => Tone::SILENT,
        }
    }
}

/// Which preset matches may sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateMode {
    /// Only the preset picked with the preset button
    #[default]
    SelectedOnly,
    /// Any preset
    AnyPreset,
}

/// Preset table plus the user's current selection
#[derive(Debug, Clone)]
pub struct AlarmMapper {
    presets: [u16; PRESET_COUNT],
    selected: usize,
    gate: GateMode,
}

impl AlarmMapper {
    /// Create a mapper; an out-of-range selection starts at preset 0
    pub fn new(presets: [u16; PRESET_COUNT], selected: u8, gate: GateMode) -> Self {
        let selected = selected as usize;
        Self {
            presets,
            selected: if selected < PRESET_COUNT { selected } else { 0 },
            gate,
        }
    }

    /// Advance to the next preset, wrapping after the last
    pub fn cycle_preset(&mut self) -> usize {
        self.selected = (self.selected + 1) % PRESET_COUNT;
        self.selected
    }

    /// Index of the selected preset
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Distance of the selected preset
    pub fn selected_distance(&self) -> u16 {
        self.presets[self.selected]
    }

    /// Alarm level for a ranging measurement
    pub fn level(&self, distance: u16) -> u8 {
        match self.gate {
            GateMode::SelectedOnly if distance != self.selected_distance() => 0,
            _ => level_for(distance, &self.presets),
        }
    }

    /// Alarm level for a tilt measurement: full volume once level
    pub fn tilt_level(&self, combined: u16) -> u8 {
        if combined == 0 {
            MAX_LEVEL
        } else {
            0
        }
    }
}
