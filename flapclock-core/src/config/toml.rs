//! Simple TOML parser for clock configuration
//!
//! This is a minimal parser for the subset of TOML used by `clock.toml`. It
//! does NOT support the full TOML spec.
//!
//! Supported features:
//! - [section] headers (`display`, `clock`, `sensor`, `brightness`)
//! - Key = value pairs (string, integer, boolean)
//! - Single-line integer arrays: `sunrise = [9, 8, 7]`
//! - Comments (# ...)
//!
//! Unknown sections and keys are rejected so typos do not go unnoticed.

use super::types::{
    ClockConfig, HourConvention, Language, Order, RotationPolicy, TemperatureUnit,
    MAX_BRIGHTNESS, MONTHS,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Key not recognized in its section
    UnknownKey,
    /// Invalid value type or range
    InvalidValue,
    /// Too many items in an array
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Clock,
    Sensor,
    Brightness,
}

/// Parse TOML configuration into ClockConfig
///
/// Keys that are not present keep their `ClockConfig::default()` value.
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
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

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "clock" => Ok(Section::Clock),
        "sensor" => Ok(Section::Sensor),
        "brightness" => Ok(Section::Brightness),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_level(value: &str) -> Result<u8, ParseError> {
    let level: u8 = parse_int(value)?;
    if level > MAX_BRIGHTNESS {
        return Err(ParseError::InvalidValue);
    }
    Ok(level)
}

/// Parse `[a, b, c]` holding exactly one hour per month
fn parse_hours(value: &str) -> Result<[u8; MONTHS], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut hours = [0u8; MONTHS];
    let mut count = 0;
    for item in inner.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        if count == MONTHS {
            return Err(ParseError::TooManyItems);
        }
        let hour: u8 = parse_int(item)?;
        if hour > 24 {
            return Err(ParseError::InvalidValue);
        }
        hours[count] = hour;
        count += 1;
    }

    if count != MONTHS {
        return Err(ParseError::InvalidValue);
    }
    Ok(hours)
}

fn parse_rotation(value: &str) -> Result<RotationPolicy, ParseError> {
    match parse_string(value) {
        "shortest" => Ok(RotationPolicy::Shortest),
        "up" => Ok(RotationPolicy::Up),
        "down" => Ok(RotationPolicy::Down),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_order(value: &str) -> Result<Order, ParseError> {
    match parse_string(value) {
        "natural" => Ok(Order::Natural),
        "reversed" => Ok(Order::Reversed),
        other => Order::from_sign(parse_int(other)?).ok_or(ParseError::InvalidValue),
    }
}

fn parse_hours_convention(value: &str) -> Result<HourConvention, ParseError> {
    match parse_int::<u8>(parse_string(value))? {
        12 => Ok(HourConvention::H12),
        24 => Ok(HourConvention::H24),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_language(value: &str) -> Result<Language, ParseError> {
    match parse_string(value) {
        "de" => Ok(Language::De),
        "en" => Ok(Language::En),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_unit(value: &str) -> Result<TemperatureUnit, ParseError> {
    match parse_string(value) {
        "C" | "celsius" => Ok(TemperatureUnit::Celsius),
        "F" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Display, "rotation") => config.rotation = parse_rotation(value)?,
        (Section::Display, "order") => config.order = parse_order(value)?,
        (Section::Display, "row_interval_ms") => config.row_interval_ms = parse_int(value)?,
        (Section::Display, "inverse") => config.inverse = parse_bool(value)?,

        (Section::Clock, "leading_zero") => config.leading_zero = parse_bool(value)?,
        (Section::Clock, "hours") => config.hour_convention = parse_hours_convention(value)?,
        (Section::Clock, "language") => config.language = parse_language(value)?,
        (Section::Clock, "debounce_ms") => config.debounce_ms = parse_int(value)?,

        (Section::Sensor, "enabled") => config.temperature_sensor = parse_bool(value)?,
        (Section::Sensor, "unit") => config.temperature_unit = parse_unit(value)?,
        (Section::Sensor, "offset_x10") => config.temperature_offset_x10 = parse_int(value)?,

        (Section::Brightness, "day") => config.brightness.day = parse_level(value)?,
        (Section::Brightness, "night") => config.brightness.night = parse_level(value)?,
        (Section::Brightness, "sunrise") => config.brightness.sunrise = parse_hours(value)?,
        (Section::Brightness, "sunset") => config.brightness.sunset = parse_hours(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
