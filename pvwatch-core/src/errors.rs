//! Error Types for the Acquisition Pipeline
//!
//! ## Design Philosophy
//!
//! The monitor is a display-only device with nothing to actuate, so almost
//! nothing here is allowed to stop the sampling loop. Errors are split by
//! how far they travel:
//!
//! 1. **Sensor unavailable** (`SensorError`): a channel could not be read.
//!    The pipeline turns this into an error flag on the Data Record and the
//!    presentation layer shows `ERROR` instead of a value.
//!
//! 2. **Implausible reading**: not an error type at all. Conversions above a
//!    plausibility ceiling are zeroed by the conversion stage and never
//!    surface here.
//!
//! 3. **Calibration insufficiency** (`CalibrationWarning`): too few usable
//!    samples during baseline averaging. Returned inside the calibration
//!    report next to a mid-scale fallback, never as `Err`.
//!
//! 4. **Setup mistakes** (`ConfigError`): the only errors returned from a
//!    constructor. They are caught once at startup, before any sampling.
//!
//! 5. **Sink failures** (`SinkError`): a display or diagnostic write went
//!    wrong. Logged by the monitor, then the next cycle runs as usual.
//!
//! All types are `Copy` and carry only `&'static str` or small enums, so they
//! can be returned from hot paths without allocation.
//!
//! ```rust
//! use pvwatch_core::{Channel, SensorError};
//!
//! fn describe(err: SensorError) -> &'static str {
//!     match err {
//!         SensorError::Unavailable { channel: Channel::Climate } => "check DHT wiring",
//!         SensorError::Unavailable { .. } => "check analog front end",
//!     }
//! }
//! # assert_eq!(describe(SensorError::Unavailable { channel: Channel::Climate }), "check DHT wiring");
//! ```

use thiserror_no_std::Error;

use crate::source::Channel;

/// Result type for sensor reads
pub type SensorResult<T> = Result<T, SensorError>;

/// A sensing channel could not deliver a sample this cycle
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The driver reported an undefined value or a read failure
    #[error("{channel} sensor unavailable")]
    Unavailable {
        /// Channel that failed
        channel: Channel,
    },
}

impl SensorError {
    /// Channel the error refers to
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Unavailable { channel } => *channel,
        }
    }
}

/// Degraded calibration outcome. Never fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationWarning {
    /// Every baseline sample sat on a rail (or failed to read); mid-scale was used instead
    #[error("no valid baseline samples on {channel}, using mid-scale {fallback}")]
    NoValidSamples {
        /// Channel whose baseline fell back
        channel: Channel,
        /// Raw value substituted for the baseline
        fallback: u16,
    },
}

/// Invalid monitor configuration
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Reference voltage or ADC full scale is zero, negative or not finite
    #[error("invalid ADC reference: vref {vref} V, full scale {adc_max}")]
    InvalidReference {
        /// Configured reference voltage
        vref: f32,
        /// Configured full-scale code
        adc_max: u16,
    },

    /// Light guard thresholds are not ordered inside [0, vref]
    #[error("light guards must satisfy 0 <= {low} < {high} <= vref")]
    InvalidGuards {
        /// Low (saturated bright) guard voltage
        low: f32,
        /// High (saturated dark) guard voltage
        high: f32,
    },

    /// A scale or sensitivity constant is not strictly positive
    #[error("{name} must be positive, got {value}")]
    InvalidConstant {
        /// Name of the offending field
        name: &'static str,
        /// Configured value
        value: f32,
    },

    /// Sampling period of zero
    #[error("sample period must be non-zero")]
    InvalidPeriod,
}

/// Consumer of a Data Record failed to present it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Formatting into the output buffer or stream failed
    #[error("formatting failed")]
    Format,

    /// The display rejected a draw call or the frame transfer
    #[error("display error: {reason}")]
    Display {
        /// What went wrong
        reason: &'static str,
    },
}

impl From<core::fmt::Error> for SinkError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Format
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unavailable { channel } => defmt::write!(fmt, "{} sensor unavailable", channel),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationWarning {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoValidSamples { channel, fallback } => {
                defmt::write!(fmt, "No valid baseline on {}, using {}", channel, fallback)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidReference { vref, adc_max } => {
                defmt::write!(fmt, "Invalid reference {} V / {}", vref, adc_max)
            }
            Self::InvalidGuards { low, high } => {
                defmt::write!(fmt, "Invalid light guards [{}, {}]", low, high)
            }
            Self::InvalidConstant { name, value } => {
                defmt::write!(fmt, "{} must be positive, got {}", name, value)
            }
            Self::InvalidPeriod => defmt::write!(fmt, "Sample period must be non-zero"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SinkError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Format => defmt::write!(fmt, "Formatting failed"),
            Self::Display { reason } => defmt::write!(fmt, "Display error: {}", reason),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn sensor_error_message_names_channel() {
        let err = SensorError::Unavailable { channel: Channel::Climate };
        assert_eq!(err.to_string(), "climate sensor unavailable");
        assert_eq!(err.channel(), Channel::Climate);
    }

    #[test]
    fn calibration_warning_reports_fallback() {
        let warning = CalibrationWarning::NoValidSamples {
            channel: Channel::Light,
            fallback: 2048,
        };
        assert_eq!(
            warning.to_string(),
            "no valid baseline samples on light, using mid-scale 2048"
        );
    }

    #[test]
    fn fmt_error_maps_to_format() {
        assert_eq!(SinkError::from(core::fmt::Error), SinkError::Format);
    }
}
