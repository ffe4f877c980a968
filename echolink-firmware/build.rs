//! Build script for echolink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates node.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate node.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");

    if !config_path.exists() {
        fail(
            "node.toml not found",
            &["The firmware embeds node.toml from the echolink-firmware directory."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read node.toml", &[&e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid TOML syntax in node.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_sensor(&config, &mut errors);
    validate_tilt(&config, &mut errors);
    validate_alarm(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_link(&config, &mut errors);

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid node.toml", &lines);
    }

    println!("cargo:warning=node.toml validated successfully");
}

/// Abort the build with a boxed message
fn fail(title: &str, lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

const SECTIONS: &[&str] = &["sensor", "tilt", "alarm", "display", "link", "button"];

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn string<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    config.get(section)?.get(key)?.as_str()
}

fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    if let Some(v) = int(config, section, key) {
        if v < min || v > max {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
    }
}

fn check_choice(
    config: &toml::Value,
    section: &str,
    key: &str,
    choices: &[&str],
    errors: &mut Vec<String>,
) {
    if let Some(v) = string(config, section, key) {
        if !choices.contains(&v) {
            errors.push(format!(
                "[{}] {} must be one of {}",
                section,
                key,
                choices.join(", ")
            ));
        }
    }
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "sensor", "ticks_per_cm", 1, 1000, errors);
    check_range(config, "sensor", "max_distance_cm", 1, 999, errors);
    check_range(config, "sensor", "sample_period_ms", 1, 60_000, errors);
    check_range(config, "sensor", "trigger_pulse_us", 10, 1000, errors);
    check_range(config, "sensor", "echo_timeout_us", 1, 1_000_000, errors);
    check_choice(
        config,
        "sensor",
        "echo_policy",
        &["retain_stale", "stale", "strict"],
        errors,
    );
    if let Some(width) = int(config, "sensor", "timer_width") {
        if width != 16 && width != 32 {
            errors.push("[sensor] timer_width must be 16 or 32".into());
        }
    }
}

fn validate_tilt(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["zero_x", "zero_y", "zero_z"] {
        check_range(config, "tilt", key, 0, 1023, errors);
    }
    check_range(config, "tilt", "full_scale", 1, 1023, errors);

    if let Some(channels) = config.get("tilt").and_then(|t| t.get("channels")) {
        match channels.as_array() {
            Some(items) if items.len() == 3 => {
                if items
                    .iter()
                    .any(|c| !matches!(c.as_integer(), Some(0..=3)))
                {
                    errors.push("[tilt] channels must be ADC inputs 0-3".into());
                }
            }
            _ => errors.push("[tilt] channels must list exactly 3 inputs".into()),
        }
    }
}

fn validate_alarm(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "alarm", "selected", 0, 4, errors);
    check_choice(config, "alarm", "gate", &["selected", "any"], errors);

    if let Some(presets) = config.get("alarm").and_then(|a| a.get("presets")) {
        match presets.as_array() {
            Some(items) if items.len() == 5 => {
                if items.iter().any(|p| p.as_integer().is_none()) {
                    errors.push("[alarm] presets must be integers".into());
                }
            }
            _ => errors.push("[alarm] presets must list exactly 5 distances".into()),
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "display", "places", 1, 4, errors);
    check_range(config, "display", "dwell_us", 100, 100_000, errors);
}

fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "link", "baudrate", 300, 921_600, errors);
    check_choice(
        config,
        "link",
        "layout",
        &["ranging", "raw", "telemetry"],
        errors,
    );
}
