//! Clock faces
//!
//! A face is the row of five glyph indices requested from the drum ensemble
//! plus whether the indicator marks should be visible. Slot layout:
//! `[left, second, colon, tens, units]`.

use crate::config::{ClockConfig, HourConvention, Language, TemperatureUnit};
use crate::glyph::{capital, lower, BLANK, COLON_BLANK, COLON_DOTS, COLON_TIME};
use crate::layout::DRUM_COUNT;

/// Weekday abbreviations for the two letter drums, Monday first
const WEEKDAYS_DE: [(u8, u8); 7] = [
    (capital::M, lower::O),
    (capital::D, lower::I),
    (capital::M, lower::I),
    (capital::D, lower::O),
    (capital::F, lower::R),
    (capital::S, lower::A),
    (capital::S, lower::O),
];

const WEEKDAYS_EN: [(u8, u8); 7] = [
    (capital::M, lower::O),
    (capital::T, lower::U),
    (capital::W, lower::E),
    (capital::T, lower::H),
    (capital::F, lower::R),
    (capital::S, lower::A),
    (capital::S, lower::U),
];

/// Largest value two digit drums can show
const MAX_TWO_DIGITS: i32 = 99;

/// Glyph request for the drum row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Face {
    pub glyphs: [u8; DRUM_COUNT],
    pub show_alarm: bool,
    pub show_sync: bool,
}

/// Wall-clock and sensor values a face is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// 0-23
    pub hour: u8,
    pub minute: u8,
    /// Monday = 0
    pub weekday: u8,
    /// Day of month, 1-31
    pub day: u8,
    /// Temperature in tenths of a degree Celsius
    pub celsius_x10: i16,
    pub humidity_pct: Option<u8>,
}

impl Face {
    /// `HH:MM`, with a blank instead of a leading hour zero unless configured
    pub fn clock(hour: u8, minute: u8, config: &ClockConfig) -> Self {
        let hour = match config.hour_convention {
            HourConvention::H24 => hour % 24,
            HourConvention::H12 => match hour % 12 {
                0 => 12,
                h => h,
            },
        };

        let [mut h1, h0] = split_digits(hour);
        if h1 == 0 && !config.leading_zero {
            h1 = BLANK;
        }
        let [m1, m0] = split_digits(minute % 60);

        Self {
            glyphs: [h1, h0, COLON_TIME, m1, m0],
            show_alarm: true,
            show_sync: true,
        }
    }

    /// Two-letter weekday and day of month, e.g. `Mo 07`
    pub fn date(weekday: u8, day: u8, language: Language) -> Self {
        let table = match language {
            Language::De => &WEEKDAYS_DE,
            Language::En => &WEEKDAYS_EN,
        };
        let (first, second) = table[(weekday % 7) as usize];
        let [d1, d0] = split_digits(day);

        Self {
            glyphs: [first, second, COLON_BLANK, d1, d0],
            show_alarm: false,
            show_sync: false,
        }
    }

    /// Temperature and relative humidity, separated by the low dots
    ///
    /// Values are rounded half away from zero and clamped to 0..=99.
    pub fn temperature(celsius_x10: i16, humidity_pct: Option<u8>, unit: TemperatureUnit) -> Self {
        let degrees = match unit {
            TemperatureUnit::Celsius => round_div(celsius_x10 as i32, 10),
            TemperatureUnit::Fahrenheit => round_div(celsius_x10 as i32 * 18 + 3200, 100),
        };

        let [mut t1, t0] = split_digits(degrees.clamp(0, MAX_TWO_DIGITS) as u8);
        if t1 == 0 {
            t1 = BLANK;
        }
        let [h1, h0] = match humidity_pct {
            Some(pct) => split_digits(pct),
            None => [BLANK, BLANK],
        };

        Self {
            glyphs: [t1, t0, COLON_DOTS, h1, h0],
            show_alarm: false,
            show_sync: false,
        }
    }

    /// All drums blank
    pub fn standby() -> Self {
        Self {
            glyphs: [BLANK, BLANK, COLON_BLANK, BLANK, BLANK],
            show_alarm: false,
            show_sync: false,
        }
    }
}

/// Tens and units digit, saturating at 99
fn split_digits(value: u8) -> [u8; 2] {
    let value = value.min(MAX_TWO_DIGITS as u8);
    [value / 10, value % 10]
}

/// Integer division rounding half away from zero
fn round_div(numerator: i32, denominator: i32) -> i32 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_blank_leading_zero() {
        let config = ClockConfig::default();
        assert_eq!(Face::clock(4, 59, &config).glyphs, [BLANK, 4, COLON_TIME, 5, 9]);
        assert_eq!(Face::clock(23, 5, &config).glyphs, [2, 3, COLON_TIME, 0, 5]);

        let face = Face::clock(0, 0, &config);
        assert_eq!(face.glyphs, [BLANK, 0, COLON_TIME, 0, 0]);
        assert!(face.show_alarm && face.show_sync);
    }

    #[test]
    fn test_clock_with_leading_zero() {
        let config = ClockConfig {
            leading_zero: true,
            ..ClockConfig::default()
        };
        assert_eq!(Face::clock(4, 59, &config).glyphs, [0, 4, COLON_TIME, 5, 9]);
    }

    #[test]
    fn test_clock_twelve_hour() {
        let config = ClockConfig {
            hour_convention: HourConvention::H12,
            ..ClockConfig::default()
        };
        assert_eq!(Face::clock(13, 30, &config).glyphs, [BLANK, 1, COLON_TIME, 3, 0]);
        assert_eq!(Face::clock(0, 15, &config).glyphs, [1, 2, COLON_TIME, 1, 5]);
        assert_eq!(Face::clock(12, 0, &config).glyphs, [1, 2, COLON_TIME, 0, 0]);
    }

    #[test]
    fn test_date_german() {
        // Monday the 7th
        let face = Face::date(0, 7, Language::De);
        assert_eq!(face.glyphs, [13, 15, COLON_BLANK, 0, 7]);
        assert!(!face.show_alarm);

        // Sunday the 31st
        assert_eq!(Face::date(6, 31, Language::De).glyphs, [14, 15, COLON_BLANK, 3, 1]);
        assert_eq!(Face::date(1, 1, Language::De).glyphs[..2], [11, 14]);
    }

    #[test]
    fn test_date_english() {
        assert_eq!(Face::date(1, 2, Language::En).glyphs[..2], [15, 17]);
        assert_eq!(Face::date(2, 2, Language::En).glyphs[..2], [16, 12]);
        assert_eq!(Face::date(3, 2, Language::En).glyphs[..2], [15, 13]);
        assert_eq!(Face::date(6, 2, Language::En).glyphs[..2], [14, 17]);
    }

    #[test]
    fn test_temperature_rounding() {
        let unit = TemperatureUnit::Celsius;
        assert_eq!(Face::temperature(215, Some(45), unit).glyphs, [2, 2, COLON_DOTS, 4, 5]);
        assert_eq!(Face::temperature(214, Some(45), unit).glyphs[..2], [2, 1]);
        assert_eq!(Face::temperature(94, None, unit).glyphs, [BLANK, 9, COLON_DOTS, BLANK, BLANK]);
    }

    #[test]
    fn test_temperature_clamped() {
        let unit = TemperatureUnit::Celsius;
        assert_eq!(Face::temperature(-25, None, unit).glyphs[..2], [BLANK, 0]);
        assert_eq!(Face::temperature(1500, Some(120), unit).glyphs, [9, 9, COLON_DOTS, 9, 9]);
    }

    #[test]
    fn test_temperature_fahrenheit() {
        // 21.5 C = 70.7 F
        let face = Face::temperature(215, Some(50), TemperatureUnit::Fahrenheit);
        assert_eq!(face.glyphs[..2], [7, 1]);
    }

    #[test]
    fn test_round_div_away_from_zero() {
        assert_eq!(round_div(25, 10), 3);
        assert_eq!(round_div(24, 10), 2);
        assert_eq!(round_div(-25, 10), -3);
        assert_eq!(round_div(-24, 10), -2);
    }

    #[test]
    fn test_standby_is_blank() {
        assert_eq!(Face::standby().glyphs, [BLANK, BLANK, COLON_BLANK, BLANK, BLANK]);
    }
}
