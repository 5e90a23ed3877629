//! Configuration type definitions
//!
//! `ClockConfig` is an immutable value built once at boot (from defaults or
//! the embedded `clock.toml`) and handed to whatever needs it. The drum
//! engine only sees the `EnsembleConfig` slice of it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Months in the sunrise/sunset table
pub const MONTHS: usize = 12;

/// Brightest level the MAX7219 accepts
pub const MAX_BRIGHTNESS: u8 = 15;

/// How a drum picks its rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationPolicy {
    /// Whichever way passes fewer glyphs
    Shortest,
    /// Always towards higher table positions
    Up,
    /// Always towards lower table positions
    #[default]
    Down,
}

/// Glyph enumeration direction on the drum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Order {
    /// "4" sits above "3" (order -1)
    #[default]
    Natural,
    /// "4" sits below "3" (order +1)
    Reversed,
}

impl Order {
    /// Signed convention used in config files
    pub fn sign(self) -> i8 {
        match self {
            Order::Natural => -1,
            Order::Reversed => 1,
        }
    }

    /// Parse the signed convention
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            -1 => Some(Order::Natural),
            1 => Some(Order::Reversed),
            _ => None,
        }
    }
}

/// 12 or 24 hour clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourConvention {
    H12,
    #[default]
    H24,
}

/// Weekday abbreviation language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Language {
    #[default]
    De,
    En,
}

/// Temperature face unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Day/night display brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrightnessSchedule {
    /// Level between sunrise and sunset (0-15)
    pub day: u8,
    /// Level outside daylight hours (0-15)
    pub night: u8,
    /// Approximate sunrise hour per month, January first
    pub sunrise: [u8; MONTHS],
    /// Approximate sunset hour per month, January first
    pub sunset: [u8; MONTHS],
}

impl Default for BrightnessSchedule {
    fn default() -> Self {
        Self {
            day: MAX_BRIGHTNESS,
            night: 0,
            sunrise: [9, 8, 7, 7, 6, 5, 5, 6, 6, 7, 7, 8],
            sunset: [16, 17, 18, 20, 21, 22, 22, 21, 20, 19, 17, 16],
        }
    }
}

impl BrightnessSchedule {
    /// Brightness for a calendar month (1-12) and 24-hour clock hour
    ///
    /// Out-of-range months fall back to December's table entry.
    pub fn level(&self, month: u8, hour: u8) -> u8 {
        let index = (month.clamp(1, MONTHS as u8) - 1) as usize;
        let level = if self.sunrise[index] <= hour && hour < self.sunset[index] {
            self.day
        } else {
            self.night
        };
        level.min(MAX_BRIGHTNESS)
    }
}

/// Settings the drum ensemble needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnsembleConfig {
    /// Direction policy for every move
    pub rotation: RotationPolicy,
    /// Glyph enumeration direction
    pub order: Order,
    /// Pause between animation frames
    pub row_interval_ms: u32,
    /// Lit pixels dark on a lit background
    pub inverse: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        ClockConfig::default().ensemble()
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    pub rotation: RotationPolicy,
    pub order: Order,
    /// Pause between animation frames in milliseconds
    pub row_interval_ms: u32,
    pub inverse: bool,
    /// Show "04:59" instead of " 4:59"
    pub leading_zero: bool,
    pub hour_convention: HourConvention,
    pub language: Language,
    pub temperature_unit: TemperatureUnit,
    /// Enables the temperature face
    pub temperature_sensor: bool,
    /// Added to every sensor reading, tenths of a degree
    pub temperature_offset_x10: i16,
    pub brightness: BrightnessSchedule,
    /// Button debounce window in milliseconds
    pub debounce_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            rotation: RotationPolicy::Down,
            order: Order::Natural,
            row_interval_ms: 10,
            inverse: false,
            leading_zero: false,
            hour_convention: HourConvention::H24,
            language: Language::De,
            temperature_unit: TemperatureUnit::Celsius,
            temperature_sensor: false,
            temperature_offset_x10: 0,
            brightness: BrightnessSchedule::default(),
            debounce_ms: 200,
        }
    }
}

impl ClockConfig {
    /// Drum engine settings
    pub fn ensemble(&self) -> EnsembleConfig {
        EnsembleConfig {
            rotation: self.rotation,
            order: self.order,
            row_interval_ms: self.row_interval_ms,
            inverse: self.inverse,
        }
    }
}
