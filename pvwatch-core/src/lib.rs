//! Core acquisition pipeline for PVWatch
//!
//! Samples the sensors of a small photovoltaic installation, converts raw
//! ADC codes into physical quantities, derives electrical parameters,
//! classifies the plant status and hands the finished Data Record to the
//! display and the diagnostic stream.
//!
//! Key constraints:
//! - Runs on a single-core MCU with a 12-bit ADC
//! - No heap allocation
//! - Every cycle yields a record; no sensor condition halts the loop
//!
//! ```no_run
//! use pvwatch_core::{DiagnosticWriter, Monitor, MonitorConfig};
//! # use pvwatch_core::source::AnalogChannel;
//! # struct Adc;
//! # impl pvwatch_core::AnalogInput for Adc {
//! #     type Error = core::convert::Infallible;
//! #     fn sample_channel(&mut self, _: AnalogChannel) -> nb::Result<u16, Self::Error> { Ok(2048) }
//! # }
//! # struct Dht;
//! # impl pvwatch_core::ClimateSensor for Dht {
//! #     fn read_climate(&mut self) -> (f32, f32) { (25.0, 50.0) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//! # let (adc, dht, delay) = (Adc, Dht, Delay);
//!
//! let mut monitor = Monitor::new(MonitorConfig::default(), adc, dht, delay).unwrap();
//! let mut console = DiagnosticWriter::new(String::new());
//!
//! // Calibrates on the first cycle, then samples every 2 s forever
//! monitor.run(&mut console);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod calibration;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod derived;
#[cfg(feature = "display")]
pub mod display;
pub mod errors;
pub mod format;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod source;
pub mod status;
pub mod traits;

// Public API
pub use calibration::{CalibrationMode, CalibrationReport, Calibrator};
pub use config::MonitorConfig;
#[cfg(feature = "display")]
pub use display::{DisplayRenderer, FrameTarget};
pub use errors::{CalibrationWarning, ConfigError, SensorError, SensorResult, SinkError};
pub use pipeline::{Monitor, Pipeline};
pub use record::DataRecord;
pub use report::DiagnosticWriter;
pub use source::{AnalogChannel, Channel, RawSamples, SampleSource};
pub use status::PlantStatus;
pub use traits::{AnalogInput, ClimateSensor, RecordSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
