//! Simple TOML parser for node configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Echolink configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Flat integer arrays: presets = [5, 25, 60, 100, 220]
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Dotted keys and nested sections

use crate::alarm::{GateMode, PRESET_COUNT};
use crate::capture::{EchoPolicy, TimerWidth};

use super::types::{ConfigError, LinkLayout, NodeConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Array has the wrong number of items
    WrongItemCount,
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Tilt,
    Alarm,
    Display,
    Link,
    Button,
}

/// Parse TOML configuration into NodeConfig
///
/// Missing keys keep their defaults; unknown keys are ignored.
pub fn parse_config(input: &str) -> Result<NodeConfig, ParseError> {
    let mut config = NodeConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sensor" => Ok(Section::Sensor),
        "tilt" => Ok(Section::Tilt),
        "alarm" => Ok(Section::Alarm),
        "display" => Ok(Section::Display),
        "link" => Ok(Section::Link),
        "button" => Ok(Section::Button),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a fixed-length integer array like "[5, 25, 60]"
fn parse_int_array<const N: usize>(value: &str) -> Result<[u16; N], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut out = [0u16; N];
    let mut count = 0;
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if count >= N {
            return Err(ParseError::WrongItemCount);
        }
        out[count] = parse_int(item)?;
        count += 1;
    }

    if count != N {
        return Err(ParseError::WrongItemCount);
    }
    Ok(out)
}

fn parse_echo_policy(value: &str) -> Result<EchoPolicy, ParseError> {
    match parse_string(value) {
        "retain_stale" | "stale" => Ok(EchoPolicy::RetainStale),
        "strict" => Ok(EchoPolicy::Strict),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_timer_width(value: &str) -> Result<TimerWidth, ParseError> {
    match parse_int::<u8>(value)? {
        16 => Ok(TimerWidth::Bits16),
        32 => Ok(TimerWidth::Bits32),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_gate(value: &str) -> Result<GateMode, ParseError> {
    match parse_string(value) {
        "selected" => Ok(GateMode::SelectedOnly),
        "any" => Ok(GateMode::AnyPreset),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_layout(value: &str) -> Result<LinkLayout, ParseError> {
    match parse_string(value) {
        "ranging" => Ok(LinkLayout::Ranging),
        "raw" => Ok(LinkLayout::Raw),
        "telemetry" => Ok(LinkLayout::Telemetry),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut NodeConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Sensor => {
            let s = &mut config.sensor;
            match key {
                "ticks_per_cm" => s.ticks_per_cm = parse_int(value)?,
                "max_distance_cm" => s.max_distance_cm = parse_int(value)?,
                "dead_band_cm" => s.dead_band_cm = parse_int(value)?,
                "sample_period_ms" => s.sample_period_ms = parse_int(value)?,
                "trigger_pulse_us" => s.trigger_pulse_us = parse_int(value)?,
                "echo_timeout_us" => s.echo_timeout_us = parse_int(value)?,
                "echo_policy" => s.echo_policy = parse_echo_policy(value)?,
                "timer_width" => s.timer_width = parse_timer_width(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Tilt => {
            let t = &mut config.tilt;
            match key {
                "zero_x" => t.zero_x = parse_int(value)?,
                "zero_y" => t.zero_y = parse_int(value)?,
                "zero_z" => t.zero_z = parse_int(value)?,
                "full_scale" => t.full_scale = parse_int(value)?,
                "dead_band" => t.dead_band = parse_int(value)?,
                "channels" => {
                    let [x, y, z] = parse_int_array::<3>(value)?;
                    t.channel_x = u8::try_from(x).map_err(|_| ParseError::InvalidValue)?;
                    t.channel_y = u8::try_from(y).map_err(|_| ParseError::InvalidValue)?;
                    t.channel_z = u8::try_from(z).map_err(|_| ParseError::InvalidValue)?;
                }
                _ => {}
            }
        }
        Section::Alarm => {
            let a = &mut config.alarm;
            match key {
                "presets" => a.presets = parse_int_array::<PRESET_COUNT>(value)?,
                "selected" => a.selected = parse_int(value)?,
                "gate" => a.gate = parse_gate(value)?,
                _ => {}
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "dwell_us" => d.dwell_us = parse_int(value)?,
                "places" => d.places = parse_int(value)?,
                _ => {}
            }
        }
        Section::Link => {
            let l = &mut config.link;
            match key {
                "baudrate" => l.baudrate = parse_int(value)?,
                "layout" => l.layout = parse_layout(value)?,
                "strict" => l.strict = parse_bool(value)?,
                _ => {}
            }
        }
        Section::Button => {
            if key == "debounce_ms" {
                config.button.debounce_ms = parse_int(value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("dwell_us = 4000"), Some(("dwell_us", "4000")));
        assert_eq!(
            parse_key_value("gate = \"any\" # every preset"),
            Some(("gate", "\"any\""))
        );
        assert_eq!(parse_key_value("novalue ="), None);
    }

    #[test]
    fn test_parse_int_array() {
        assert_eq!(parse_int_array::<3>("[1, 2, 3]"), Ok([1, 2, 3]));
        assert_eq!(parse_int_array::<3>("[1, 2]"), Err(ParseError::WrongItemCount));
        assert_eq!(
            parse_int_array::<2>("[1, 2, 3]"),
            Err(ParseError::WrongItemCount)
        );
        assert_eq!(parse_int_array::<1>("1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int_array::<1>("[x]"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("sensor"), Ok(Section::Sensor));
        assert_eq!(parse_section_header(" link "), Ok(Section::Link));
        assert_eq!(
            parse_section_header("stepper"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config(""), Ok(NodeConfig::default()));
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# bench node
[sensor]
ticks_per_cm = 58
max_distance_cm = 300
echo_policy = "strict"
timer_width = 32

[tilt]
zero_x = 500
channels = [3, 4, 5]

[alarm]
presets = [5, 10, 15, 20, 25]
selected = 2
gate = "any"

[display]
dwell_us = 2000 # faster scan
places = 3

[link]
layout = "ranging"
strict = true

[button]
debounce_ms = 30
"#;
        let config = parse_config(config_str).unwrap();
        assert_eq!(config.sensor.max_distance_cm, 300);
        assert_eq!(config.sensor.echo_policy, EchoPolicy::Strict);
        assert_eq!(config.sensor.timer_width, TimerWidth::Bits32);
        assert_eq!(config.tilt.zero_x, 500);
        assert_eq!(config.tilt.zero_y, 515);
        assert_eq!(config.tilt.channel_z, 5);
        assert_eq!(config.alarm.presets, [5, 10, 15, 20, 25]);
        assert_eq!(config.alarm.selected, 2);
        assert_eq!(config.alarm.gate, GateMode::AnyPreset);
        assert_eq!(config.display.dwell_us, 2000);
        assert_eq!(config.display.places, 3);
        assert_eq!(config.link.layout, LinkLayout::Ranging);
        assert!(config.link.strict);
        assert_eq!(config.button.debounce_ms, 30);
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[sensor]\nticks_per_cm = fast"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nstrict = yes"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[sensor]\ntimer_width = 24"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_validation_runs() {
        assert_eq!(
            parse_config("[display]\nplaces = 0"),
            Err(ParseError::Invalid(ConfigError::InvalidPlaces))
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[sensor]\nbrightness = 3").unwrap();
        assert_eq!(config, NodeConfig::default());
    }
}
