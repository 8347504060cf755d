//! Acquisition Pipeline
//!
//! ## Overview
//!
//! One cycle turns raw samples into a finished Data Record:
//!
//! ```text
//! RawSamples ─► Conversion & Validation ─► Derived Parameters ─► Status ─► DataRecord
//!               (volts, formulas, clamps)   (power, PF, freq)    (label)
//! ```
//!
//! [`Pipeline`] is the hardware-free part: a pure function of its
//! configuration and the raw samples, so two runs over the same inputs give
//! bit-identical records. [`Monitor`] adds the hardware around it: the
//! sample source, the one-time calibration, the sinks and the fixed-period
//! loop.
//!
//! ```rust
//! use pvwatch_core::{MonitorConfig, PlantStatus, Pipeline, RawSamples};
//!
//! let pipeline = Pipeline::new(&MonitorConfig::default()).unwrap();
//!
//! // Mid-scale voltage converts to ~363 V, above the 300 V ceiling.
//! let record = pipeline.process(&RawSamples::new((22.0, 48.0), 2000, 2048, 2048));
//! assert_eq!(record.grid_voltage, 0.0);
//! assert_eq!(record.active_power, 0.0);
//! assert_eq!(record.status, PlantStatus::Standby);
//! ```

mod monitor;

pub use monitor::Monitor;

use crate::calibration::Baseline;
use crate::config::MonitorConfig;
use crate::conversion::Converter;
use crate::derived::PowerModel;
use crate::errors::ConfigError;
use crate::record::DataRecord;
use crate::source::RawSamples;
use crate::status::StatusThresholds;

/// Conversion, derivation and classification for one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    converter: Converter,
    power: PowerModel,
    thresholds: StatusThresholds,
}

impl Pipeline {
    /// Build a pipeline, rejecting configurations the formulas cannot use
    pub fn new(config: &MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            converter: Converter::new(config),
            power: config.power,
            thresholds: config.status,
        })
    }

    /// Bias later conversions with a calibrated baseline
    pub fn apply_baseline(&mut self, baseline: &Baseline) {
        self.converter.apply_current_baseline(baseline.current.raw);
    }

    /// Channel converter
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Run one cycle's samples through every stage
    pub fn process(&self, raw: &RawSamples) -> DataRecord {
        let primary = self.converter.convert(raw);
        let derived = self.power.derive(primary.grid_voltage, primary.load_current);
        let status = self
            .thresholds
            .classify(primary.grid_voltage, derived.active_power);

        DataRecord::assemble(primary, derived, status)
    }
}
