//! Light Sensor (LDR Divider) Calibration
//!
//! The LDR sits on the low side of a divider: the brighter it gets, the lower
//! the voltage at the ADC pin.

/// Lux assigned to a saturated-bright reading, and the upper clamp.
///
/// Roughly direct midday sunlight on the panel plane.
pub const LUX_MAX: f32 = 50_000.0;

/// Lower clamp for any lux conversion.
pub const LUX_MIN: f32 = 0.0;

/// Low guard voltage (V). At or below this the LDR is saturated bright.
pub const LIGHT_LOW_GUARD_V: f32 = 0.1;

/// High guard voltage (V). At or above this the LDR is saturated dark.
pub const LIGHT_HIGH_GUARD_V: f32 = 3.2;

/// Constant of the inverse-proportional formula (lux·V).
///
/// `lux = LUX_INVERSE_K / voltage`, chosen so the curve meets `LUX_MAX`
/// exactly at the low guard.
pub const LUX_INVERSE_K: f32 = LUX_MAX * LIGHT_LOW_GUARD_V;

/// Luminous efficacy of sunlight used to turn lux into irradiance (lux per W/m²).
///
/// Source: standard daylight approximation, ~120 lm/W
pub const LUX_PER_W_M2: f32 = 120.0;
