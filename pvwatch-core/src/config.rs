//! Monitor configuration
//!
//! One [`MonitorConfig`] carries every calibration constant, plausibility
//! ceiling, status threshold and the sampling period. Defaults come from
//! [`crate::constants`]; two presets cover the board variants in the field:
//!
//! - [`MonitorConfig::default`]: production firmware. Settle-only calibration,
//!   inverse light formula.
//! - [`MonitorConfig::diagnostic`]: bench firmware. Baseline averaging, linear
//!   light formula, faster sampling.
//!
//! ```rust
//! use pvwatch_core::config::MonitorConfig;
//! use pvwatch_core::conversion::LightStrategy;
//!
//! let config = MonitorConfig::default()
//!     .with_light_strategy(LightStrategy::Linear)
//!     .with_sample_period_ms(1000);
//! assert!(config.validate().is_ok());
//! ```

use crate::calibration::{CalibrationMode, CalibrationSettings};
use crate::constants::{adc, timing};
use crate::conversion::{
    CurrentCalibration, CurrentZero, LightCalibration, LightStrategy, VoltageCalibration,
};
use crate::derived::PowerModel;
use crate::errors::ConfigError;
use crate::status::StatusThresholds;

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorConfig {
    /// ADC reference voltage (V)
    pub vref: f32,
    /// ADC full-scale code
    pub adc_max: u16,
    /// Light channel calibration
    pub light: LightCalibration,
    /// Voltage channel calibration
    pub voltage: VoltageCalibration,
    /// Current channel calibration
    pub current: CurrentCalibration,
    /// Derived-parameter model
    pub power: PowerModel,
    /// Status thresholds
    pub status: StatusThresholds,
    /// Startup calibration
    pub calibration: CalibrationSettings,
    /// Period of the sampling loop (ms)
    pub sample_period_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            vref: adc::ADC_VREF,
            adc_max: adc::ADC_MAX,
            light: LightCalibration::default(),
            voltage: VoltageCalibration::default(),
            current: CurrentCalibration::default(),
            power: PowerModel::default(),
            status: StatusThresholds::default(),
            calibration: CalibrationSettings::default(),
            sample_period_ms: timing::DEFAULT_SAMPLE_PERIOD_MS,
        }
    }
}

impl MonitorConfig {
    /// Bench variant: baseline calibration, linear light mapping, 1 s period
    pub fn diagnostic() -> Self {
        Self::default()
            .with_calibration_mode(CalibrationMode::Baseline)
            .with_light_strategy(LightStrategy::Linear)
            .with_sample_period_ms(timing::FAST_SAMPLE_PERIOD_MS)
    }

    /// Select the light formula
    pub fn with_light_strategy(mut self, strategy: LightStrategy) -> Self {
        self.light.strategy = strategy;
        self
    }

    /// Select the calibration mode
    pub fn with_calibration_mode(mut self, mode: CalibrationMode) -> Self {
        self.calibration.mode = mode;
        self
    }

    /// Select the zero-current reference
    pub fn with_current_zero(mut self, zero: CurrentZero) -> Self {
        self.current.zero = zero;
        self
    }

    /// Set the sampling period
    pub fn with_sample_period_ms(mut self, period_ms: u32) -> Self {
        self.sample_period_ms = period_ms;
        self
    }

    /// Check the configuration for values that would break the formulas
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.vref.is_finite() && self.vref > 0.0) || self.adc_max == 0 {
            return Err(ConfigError::InvalidReference {
                vref: self.vref,
                adc_max: self.adc_max,
            });
        }

        let (low, high) = (self.light.low_guard_v, self.light.high_guard_v);
        if !(low >= 0.0 && low < high && high <= self.vref) {
            return Err(ConfigError::InvalidGuards { low, high });
        }

        positive("light.inverse_k", self.light.inverse_k)?;
        positive("voltage.scale", self.voltage.scale)?;
        positive("current.sensitivity_v_per_a", self.current.sensitivity_v_per_a)?;

        if self.sample_period_ms == 0 {
            return Err(ConfigError::InvalidPeriod);
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidConstant { name, value })
    }
}
