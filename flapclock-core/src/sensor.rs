//! RP2040 on-die temperature sensor conversion
//!
//! The sensor outputs 706 mV at 27 °C with a slope of -1.721 mV/°C. Readings
//! are 12-bit against a 3.3 V reference. The die runs a few degrees above
//! ambient, so `offset_x10` lets a board calibrate that away.

/// ADC full scale (12-bit)
pub const ADC_MAX: u32 = 4096;

/// ADC reference in microvolts
const VREF_UV: i64 = 3_300_000;

/// Sensor voltage at 27 °C in microvolts
const V27_UV: i64 = 706_000;

/// Slope in microvolts per °C
const SLOPE_UV_PER_C: i64 = 1_721;

/// Convert a raw ADC sample to tenths of a degree Celsius
pub fn die_temperature_x10(raw: u16, offset_x10: i16) -> i16 {
    let raw = (raw as u32).min(ADC_MAX - 1) as i64;
    let sensor_uv = raw * VREF_UV / ADC_MAX as i64;
    let celsius_x10 = 270 - (sensor_uv - V27_UV) * 10 / SLOPE_UV_PER_C;
    (celsius_x10 + offset_x10 as i64) as i16
}
