//! Analog Front-End Specifications
//!
//! The board samples every analog channel through a 12-bit successive
//! approximation ADC referenced to the 3.3 V rail.

// ===== CONVERTER =====

/// Full-scale code of the 12-bit ADC.
///
/// Raw samples are integers in `[0, ADC_MAX]`. Larger values coming out of
/// a driver are saturated to this code.
///
/// Source: ESP32 / RP2040 SAR ADC, 12-bit mode
pub const ADC_MAX: u16 = 4095;

/// ADC reference voltage (V).
///
/// A raw sample maps to volts as `raw * ADC_VREF / ADC_MAX`.
pub const ADC_VREF: f32 = 3.3;

/// Mid-scale raw code.
///
/// Safe default baseline when calibration finds no usable samples.
pub const ADC_MID_SCALE: u16 = 2048;

// ===== CALIBRATION =====

/// Samples discarded per channel after power-up.
///
/// The input RC networks of the light divider and the AC sensor
/// conditioning stages need a few hundred milliseconds to settle.
pub const SETTLE_SAMPLES: u16 = 50;

/// Interval between settling samples (ms).
pub const SETTLE_INTERVAL_MS: u32 = 10;

/// Samples averaged per channel for the baseline.
pub const BASELINE_SAMPLES: u16 = 20;

/// Interval between baseline samples (ms).
pub const BASELINE_INTERVAL_MS: u32 = 10;

/// Guard band around both rails (raw codes).
///
/// A baseline sample `<= RAIL_GUARD` or `>= ADC_MAX - RAIL_GUARD` is treated
/// as a stuck or disconnected input and left out of the average.
pub const RAIL_GUARD: u16 = 10;
