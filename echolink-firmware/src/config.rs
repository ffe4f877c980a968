//! Configuration loading
//!
//! `node.toml` is embedded at compile time (and validated by build.rs), then
//! parsed at boot with the core's no_std parser.

use defmt::*;

use echolink_core::config::{parse_config, NodeConfig};

/// Embedded configuration. Edit node.toml and rebuild to customize.
const EMBEDDED_CONFIG: &str = include_str!("../node.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load() -> NodeConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse node.toml: {:?}", e);
            error!("Using built-in defaults");
            NodeConfig::default()
        }
    }
}

/// Log the values most likely to need tuning on the bench
pub fn log_summary(config: &NodeConfig) {
    info!(
        "Sensor: {} ticks/cm, max {} cm, every {} ms, policy {:?}",
        config.sensor.ticks_per_cm,
        config.sensor.max_distance_cm,
        config.sensor.sample_period_ms,
        config.sensor.echo_policy
    );
    info!(
        "Tilt: zero=({}, {}, {}) full_scale={}",
        config.tilt.zero_x, config.tilt.zero_y, config.tilt.zero_z, config.tilt.full_scale
    );
    info!(
        "Alarm: presets={} selected={} gate={:?}",
        config.alarm.presets, config.alarm.selected, config.alarm.gate
    );
    info!(
        "Link: {} baud, layout {:?}, strict={}",
        config.link.baudrate, config.link.layout, config.link.strict
    );
}
