//! AC Voltage and Current Sensing
//!
//! Both AC sensors deliver a conditioned DC level to the ADC. Scale factors
//! are calibrated for a 220 V nominal single-phase line.

// ===== GRID VOLTAGE =====

/// ADC volts to grid RMS volts.
///
/// Calibrated against a 220 V line on the ZMPT101B module.
pub const VOLTAGE_SCALE: f32 = 220.0;

/// Plausibility ceiling for grid voltage (V).
///
/// Conversions above this are rejected and reported as 0.
pub const VOLTAGE_CEILING_V: f32 = 300.0;

// ===== LOAD CURRENT =====

/// Current sensor sensitivity (V/A).
///
/// Source: ACS712-20A datasheet, 100 mV/A
pub const CURRENT_SENSITIVITY_V_PER_A: f32 = 0.1;

/// Plausibility ceiling for load current (A).
pub const CURRENT_CEILING_A: f32 = 50.0;

// ===== DERIVED PARAMETERS =====

/// Assumed power factor. There is no power factor sensing.
pub const ASSUMED_POWER_FACTOR: f32 = 0.9;

/// Nominal grid frequency (Hz), a placeholder for zero-crossing measurement.
pub const NOMINAL_FREQUENCY_HZ: f32 = 50.0;

/// Active power ceiling (W). Implausible for the installation, reported as 0.
pub const POWER_CEILING_W: f32 = 10_000.0;

/// Active power noise floor (W). Below this the plant is treated as no-load.
pub const POWER_NOISE_FLOOR_W: f32 = 0.1;

// ===== STATUS THRESHOLDS =====

/// Lowest grid voltage considered healthy (V).
pub const GRID_VOLTAGE_MIN_V: f32 = 180.0;

/// Highest grid voltage considered healthy (V).
pub const GRID_VOLTAGE_MAX_V: f32 = 250.0;

/// Power above which the plant is under high load (W).
pub const HIGH_LOAD_W: f32 = 5_000.0;

/// Power above which the plant is operating normally (W).
pub const NORMAL_LOAD_W: f32 = 1_000.0;

/// Power above which the plant is under low load (W).
pub const LOW_LOAD_W: f32 = 100.0;
