//! Conversion & Validation Stage
//!
//! ## Overview
//!
//! Turns one cycle's [`RawSamples`] into primary physical quantities:
//!
//! ```text
//! raw code ──► volts ──► channel formula ──► plausibility clamp ──► quantity
//!   [0, 4095]   raw·VREF/ADC_MAX
//! ```
//!
//! | Channel  | Formula                              | Clamp                     |
//! |----------|--------------------------------------|---------------------------|
//! | Light    | guard zones + [`LightStrategy`]      | [0, 50000] lux            |
//! | Voltage  | `v · 220`                            | > 300 V → 0               |
//! | Current  | `|v − zero| / 0.1 V/A`               | > 50 A → 0                |
//! | Climate  | pass-through                         | unavailable → NaN + flag  |
//!
//! ## Failure Policy
//!
//! Implausible readings are zeroed, not flagged ("fail quiet, stay safe").
//! A channel that could not be read at all sets its error flag and reports
//! 0 (analog) or NaN (climate). Conversion never fails and never logs above
//! `debug`.
//!
//! ## Determinism
//!
//! [`Converter::convert`] is a pure function of its configuration and the raw
//! samples: the same inputs always yield bit-identical outputs.

pub mod electrical;
pub mod light;
pub mod utils;

pub use electrical::{CurrentCalibration, CurrentZero, VoltageCalibration};
pub use light::{irradiance, LightCalibration, LightStrategy};
pub use utils::raw_to_voltage;

use crate::config::MonitorConfig;
use crate::source::RawSamples;

/// Primary quantities of one cycle, before derivation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryQuantities {
    /// Air temperature (°C), NaN when `dht_error`
    pub temperature: f32,
    /// Relative humidity (%RH), NaN when `dht_error`
    pub humidity: f32,
    /// Illuminance (lux)
    pub light_intensity: f32,
    /// Irradiance (W/m²)
    pub irradiance: f32,
    /// Grid RMS voltage (V)
    pub grid_voltage: f32,
    /// Load RMS current (A)
    pub load_current: f32,
    /// Climate sensor unavailable
    pub dht_error: bool,
    /// Light channel unavailable
    pub ldr_error: bool,
    /// Voltage channel unavailable
    pub voltage_error: bool,
    /// Current channel unavailable
    pub current_error: bool,
}

/// Per-channel conversion with the calibration of one monitor
#[derive(Debug, Clone)]
pub struct Converter {
    vref: f32,
    adc_max: u16,
    light: LightCalibration,
    voltage: VoltageCalibration,
    current: CurrentCalibration,
    current_zero_v: f32,
}

impl Converter {
    /// Converter for a configuration, with the nominal zero-current level (VREF/2)
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            vref: config.vref,
            adc_max: config.adc_max,
            light: config.light,
            voltage: config.voltage,
            current: config.current,
            current_zero_v: config.vref / 2.0,
        }
    }

    /// Bias the current channel with a calibrated baseline.
    ///
    /// Only takes effect with [`CurrentZero::Baseline`]; with
    /// [`CurrentZero::Fixed`] the nominal VREF/2 stays in place.
    pub fn apply_current_baseline(&mut self, baseline_raw: u16) {
        if self.current.zero == CurrentZero::Baseline {
            self.current_zero_v = self.voltage(baseline_raw);
            log_debug!("current zero offset set to {} V", self.current_zero_v);
        }
    }

    /// Zero-current level in volts
    pub fn current_zero_v(&self) -> f32 {
        self.current_zero_v
    }

    /// Raw code to volts for this converter's ADC
    #[inline]
    pub fn voltage(&self, raw: u16) -> f32 {
        utils::raw_to_voltage(raw, self.vref, self.adc_max)
    }

    /// Illuminance for a raw light sample
    pub fn light_intensity(&self, raw: u16) -> f32 {
        self.light.lux(self.voltage(raw))
    }

    /// Grid voltage for a raw voltage sample
    pub fn grid_voltage(&self, raw: u16) -> f32 {
        self.voltage.grid_voltage(self.voltage(raw))
    }

    /// Load current for a raw current sample
    pub fn load_current(&self, raw: u16) -> f32 {
        self.current.load_current(self.voltage(raw), self.current_zero_v)
    }

    /// Convert and validate every channel of one cycle
    pub fn convert(&self, raw: &RawSamples) -> PrimaryQuantities {
        let (temperature, humidity, dht_error) = match raw.climate {
            Ok(sample) if sample.is_valid() => (sample.temperature, sample.humidity, false),
            _ => (f32::NAN, f32::NAN, true),
        };

        let (light_intensity, ldr_error) = match raw.light {
            Ok(code) => (self.light_intensity(code), false),
            Err(_) => (0.0, true),
        };

        let (grid_voltage, voltage_error) = match raw.voltage {
            Ok(code) => (self.grid_voltage(code), false),
            Err(_) => (0.0, true),
        };

        let (load_current, current_error) = match raw.current {
            Ok(code) => (self.load_current(code), false),
            Err(_) => (0.0, true),
        };

        PrimaryQuantities {
            temperature,
            humidity,
            light_intensity,
            irradiance: irradiance(light_intensity),
            grid_voltage,
            load_current,
            dht_error,
            ldr_error,
            voltage_error,
            current_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SensorError;
    use crate::source::{Channel, ClimateSample};
    use approx::assert_relative_eq;

    fn converter() -> Converter {
        Converter::new(&MonitorConfig::default())
    }

    #[test]
    fn mid_scale_voltage_is_rejected() {
        let conv = converter();
        assert_relative_eq!(conv.voltage(2048), 1.6504, epsilon = 0.001);
        assert_eq!(conv.grid_voltage(2048), 0.0);
    }

    #[test]
    fn mid_scale_current_is_near_zero() {
        let conv = converter();
        assert!(conv.load_current(2048) < 0.01);
    }

    #[test]
    fn climate_passes_through() {
        let raw = RawSamples::new((24.5, 61.0), 1000, 1000, 2048);
        let q = converter().convert(&raw);
        assert_eq!(q.temperature, 24.5);
        assert_eq!(q.humidity, 61.0);
        assert!(!q.dht_error);
    }

    #[test]
    fn missing_humidity_marks_both_unavailable() {
        let raw = RawSamples::new((24.5, f32::NAN), 1000, 1000, 2048);
        let q = converter().convert(&raw);
        assert!(q.temperature.is_nan());
        assert!(q.humidity.is_nan());
        assert!(q.dht_error);
    }

    #[test]
    fn hand_built_invalid_climate_is_still_flagged() {
        let mut raw = RawSamples::new((20.0, 50.0), 1000, 1000, 2048);
        raw.climate = Ok(ClimateSample {
            temperature: f32::INFINITY,
            humidity: 50.0,
        });
        assert!(converter().convert(&raw).dht_error);
    }

    #[test]
    fn unavailable_analog_channel_reports_zero_and_flag() {
        let mut raw = RawSamples::new((20.0, 50.0), 1000, 1000, 2048);
        raw.voltage = Err(SensorError::Unavailable {
            channel: Channel::Voltage,
        });
        let q = converter().convert(&raw);
        assert_eq!(q.grid_voltage, 0.0);
        assert!(q.voltage_error);
        assert!(!q.ldr_error);
        assert!(!q.current_error);
    }

    #[test]
    fn current_baseline_only_applies_when_selected() {
        let mut fixed = converter();
        fixed.apply_current_baseline(2100);
        assert_relative_eq!(fixed.current_zero_v(), 1.65, epsilon = 1e-6);

        let config = MonitorConfig::default().with_current_zero(CurrentZero::Baseline);
        let mut biased = Converter::new(&config);
        biased.apply_current_baseline(2100);
        assert_relative_eq!(biased.current_zero_v(), biased.voltage(2100), epsilon = 1e-6);
        assert_eq!(biased.load_current(2100), 0.0);
    }
}
