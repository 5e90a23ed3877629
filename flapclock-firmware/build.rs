//! Build script for flapclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time

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

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml at compile time
///
/// Accepts the same sections, keys and ranges as the boot-time parser.
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");
    if !config_path.exists() {
        fail("clock.toml not found", &["Create one in the flapclock-firmware directory.".into()]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read clock.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail("clock.toml is not valid TOML", &[e.message().to_string()]),
    };

    let mut errors = Vec::new();
    validate_keys(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_clock(&config, &mut errors);
    validate_sensor(&config, &mut errors);
    validate_brightness(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid clock configuration", &errors);
    }
}

/// Sections and the keys each one accepts
const SCHEMA: &[(&str, &[&str])] = &[
    ("display", &["rotation", "order", "row_interval_ms", "inverse"]),
    ("clock", &["leading_zero", "hours", "language", "debounce_ms"]),
    ("sensor", &["enabled", "unit", "offset_x10"]),
    ("brightness", &["day", "night", "sunrise", "sunset"]),
];

fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".into());
        return;
    };

    for (section, value) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match get(config, section, key) {
        None => {}
        Some(toml::Value::Integer(v)) if range.contains(v) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be an integer in {}..={}",
            section,
            key,
            range.start(),
            range.end()
        )),
    }
}

fn check_bool(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = get(config, section, key) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
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
    match get(config, section, key) {
        None => {}
        Some(toml::Value::String(s)) if choices.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be one of {}",
            section,
            key,
            choices.join(", ")
        )),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    check_choice(config, "display", "rotation", &["shortest", "up", "down"], errors);
    match get(config, "display", "order") {
        None | Some(toml::Value::Integer(-1 | 1)) => {}
        Some(toml::Value::String(s)) if s == "natural" || s == "reversed" => {}
        Some(_) => errors.push("[display] order must be -1 or 1".into()),
    }
    check_int(config, "display", "row_interval_ms", 0..=1000, errors);
    check_bool(config, "display", "inverse", errors);
}

fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) {
    check_bool(config, "clock", "leading_zero", errors);
    match get(config, "clock", "hours") {
        None | Some(toml::Value::Integer(12 | 24)) => {}
        Some(_) => errors.push("[clock] hours must be 12 or 24".into()),
    }
    check_choice(config, "clock", "language", &["de", "en"], errors);
    check_int(config, "clock", "debounce_ms", 0..=5000, errors);
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    check_bool(config, "sensor", "enabled", errors);
    check_choice(config, "sensor", "unit", &["C", "F", "celsius", "fahrenheit"], errors);
    check_int(config, "sensor", "offset_x10", -500..=500, errors);
}

fn validate_brightness(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "brightness", "day", 0..=15, errors);
    check_int(config, "brightness", "night", 0..=15, errors);

    for key in ["sunrise", "sunset"] {
        match get(config, "brightness", key) {
            None => {}
            Some(toml::Value::Array(hours)) => {
                if hours.len() != 12 {
                    errors.push(format!("[brightness] {} needs 12 entries, one per month", key));
                }
                let valid = hours
                    .iter()
                    .all(|h| matches!(h, toml::Value::Integer(v) if (0..=24).contains(v)));
                if !valid {
                    errors.push(format!("[brightness] {} hours must be 0-24", key));
                }
            }
            Some(_) => errors.push(format!("[brightness] {} must be an array", key)),
        }
    }
}

fn fail(title: &str, details: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        details
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
