//! Shared conversion helpers
//!
//! Pure functions used by every channel: raw code to volts, and the
//! "reject absurd reading" clamp. Nothing here logs or allocates.

/// Convert a raw ADC code to volts.
///
/// Monotonically non-decreasing in `raw`. Codes above `adc_max` are
/// saturated first so a misbehaving driver cannot push the voltage past
/// `vref`.
#[inline]
pub fn raw_to_voltage(raw: u16, vref: f32, adc_max: u16) -> f32 {
    let raw = raw.min(adc_max);
    raw as f32 * vref / adc_max as f32
}

/// Zero a value above its plausibility ceiling.
///
/// Non-finite values are zeroed too. The result is indistinguishable from a
/// genuine zero reading.
#[inline]
pub fn reject_above(value: f32, ceiling: f32) -> f32 {
    if !value.is_finite() || value > ceiling {
        0.0
    } else {
        value
    }
}

/// Clamp into `[min, max]`, mapping NaN to `min`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() || value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
