//! Constants for PVWatch Core
//!
//! Centralized, documented constants for every calibration formula,
//! plausibility ceiling and status threshold in the pipeline. The defaults in
//! [`MonitorConfig`](crate::config::MonitorConfig) are built from these.
//!
//! ## Organization
//!
//! - **ADC**: converter range, reference and calibration sampling
//! - **Light**: LDR guard thresholds and lux formulas
//! - **Electrical**: voltage/current scaling, derived-parameter clamps, status thresholds
//! - **Timing**: sampling period

/// Converter specifications and calibration sampling.
pub mod adc;

/// Light sensor calibration.
pub mod light;

/// AC voltage/current sensing, derived parameters and status thresholds.
pub mod electrical;

/// Scheduling.
pub mod timing;

pub use adc::{ADC_MAX, ADC_MID_SCALE, ADC_VREF, RAIL_GUARD};
pub use electrical::{
    ASSUMED_POWER_FACTOR, CURRENT_CEILING_A, NOMINAL_FREQUENCY_HZ, POWER_CEILING_W,
    POWER_NOISE_FLOOR_W, VOLTAGE_CEILING_V,
};
pub use light::{LUX_MAX, LUX_MIN, LUX_PER_W_M2};
pub use timing::DEFAULT_SAMPLE_PERIOD_MS;
