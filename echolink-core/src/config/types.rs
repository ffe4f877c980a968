//! Configuration type definitions
//!
//! Every calibration constant the node uses lives here with its bench default.
//! The firmware overrides them from the embedded `node.toml`.

use echolink_protocol::{FrameLayout, IntegrityPolicy};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::alarm::{GateMode, PRESET_COUNT};
use crate::capture::{EchoPolicy, TimerWidth};

/// Ultrasonic ranging calibration and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Capture ticks per centimetre of range (1 µs ticks, round trip)
    pub ticks_per_cm: u32,
    /// Largest distance reported; anything beyond is clamped
    pub max_distance_cm: u16,
    /// Dead-band threshold on the distance channel (0 disables)
    pub dead_band_cm: u16,
    /// Sampling period
    pub sample_period_ms: u32,
    /// Trigger pulse width
    pub trigger_pulse_us: u32,
    /// How long to wait for the falling edge before giving up
    pub echo_timeout_us: u32,
    /// Missing-echo handling
    pub echo_policy: EchoPolicy,
    /// Capture timer width
    pub timer_width: TimerWidth,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ticks_per_cm: 58,
            max_distance_cm: 400,
            dead_band_cm: 0,
            sample_period_ms: 200,
            trigger_pulse_us: 10,
            echo_timeout_us: 30_000,
            echo_policy: EchoPolicy::RetainStale,
            timer_width: TimerWidth::Bits16,
        }
    }
}

/// Accelerometer calibration for tilt mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TiltConfig {
    /// Level reading of the X axis (10-bit counts)
    pub zero_x: u16,
    /// Level reading of the Y axis
    pub zero_y: u16,
    /// Level reading of the Z axis
    pub zero_z: u16,
    /// Deviation corresponding to 1 g (90°)
    pub full_scale: u16,
    /// Dead-band threshold per axis
    pub dead_band: u16,
    /// ADC channel of each axis
    pub channel_x: u8,
    pub channel_y: u8,
    pub channel_z: u8,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            zero_x: 505,
            zero_y: 515,
            zero_z: 526,
            full_scale: 97,
            dead_band: 2,
            channel_x: 0,
            channel_y: 1,
            channel_z: 2,
        }
    }
}

/// Proximity alarm presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmConfig {
    /// Distances (cm) that sound the alarm, loudest first
    pub presets: [u16; PRESET_COUNT],
    /// Preset selected at boot
    pub selected: u8,
    /// Which presets may sound
    pub gate: GateMode,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            presets: [5, 25, 60, 100, 220],
            selected: 0,
            gate: GateMode::SelectedOnly,
        }
    }
}

/// Multiplexed display timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Time each digit stays lit per pass
    pub dwell_us: u32,
    /// Digit-select lines wired (1-4)
    pub places: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dwell_us: 4000,
            places: 4,
        }
    }
}

/// Frame layout on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LinkLayout {
    /// 3 digits, no mode tag
    Ranging,
    /// 4 digits, no mode tag
    Raw,
    /// 4 digits and a mode tag
    #[default]
    Telemetry,
}

impl LinkLayout {
    /// Slot arrangement for this layout
    pub const fn frame_layout(&self) -> FrameLayout {
        match self {
            LinkLayout::Ranging => FrameLayout::RANGING,
            LinkLayout::Raw => FrameLayout::RAW,
            LinkLayout::Telemetry => FrameLayout::TELEMETRY,
        }
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Baud rate (8N1)
    pub baudrate: u32,
    /// Frame layout shared by both nodes
    pub layout: LinkLayout,
    /// Validate received frames instead of decoding positionally
    pub strict: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            layout: LinkLayout::Telemetry,
            strict: false,
        }
    }
}

impl LinkConfig {
    /// Decode policy for the receiver
    pub const fn integrity(&self) -> IntegrityPolicy {
        if self.strict {
            IntegrityPolicy::Strict
        } else {
            IntegrityPolicy::Permissive
        }
    }
}

/// Push-button handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Settle time before the pin is re-read
    pub debounce_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { debounce_ms: 20 }
    }
}

/// Complete node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeConfig {
    pub sensor: SensorConfig,
    pub tilt: TiltConfig,
    pub alarm: AlarmConfig,
    pub display: DisplayConfig,
    pub link: LinkConfig,
    pub button: ButtonConfig,
}

/// Configuration that parses but cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `ticks_per_cm` or `full_scale` is zero
    ZeroDivisor,
    /// `places` outside 1-4
    InvalidPlaces,
    /// `selected` does not index a preset
    InvalidPreset,
}

impl NodeConfig {
    /// Check invariants the parser cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor.ticks_per_cm == 0 || self.tilt.full_scale == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if self.display.places == 0 || self.display.places > 4 {
            return Err(ConfigError::InvalidPlaces);
        }
        if self.alarm.selected as usize >= PRESET_COUNT {
            return Err(ConfigError::InvalidPreset);
        }
        Ok(())
    }
}
