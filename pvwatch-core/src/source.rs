//! Raw Sample Source
//!
//! Wraps the four sensing channels behind one read interface:
//!
//! | Channel  | Capability         | Unavailable when                         |
//! |----------|--------------------|------------------------------------------|
//! | Climate  | [`ClimateSensor`]  | either value is NaN or infinite          |
//! | Light    | [`AnalogInput`]    | the driver returns an error              |
//! | Voltage  | [`AnalogInput`]    | the driver returns an error              |
//! | Current  | [`AnalogInput`]    | the driver returns an error              |
//!
//! Temperature and humidity share one physical sensor, so they become
//! unavailable together. Drivers with an `Infallible` error type make the
//! analog channels always available.

use core::fmt;

use crate::errors::{SensorError, SensorResult};
use crate::traits::{AnalogInput, ClimateSensor};

/// Every sensing channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Temperature/humidity combo sensor
    Climate,
    /// Light-dependent resistor divider
    Light,
    /// AC voltage sensor
    Voltage,
    /// AC current sensor
    Current,
}

impl Channel {
    /// Lowercase channel name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::Light => "light",
            Self::Voltage => "voltage",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channels sampled through the ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Light-dependent resistor divider
    Light,
    /// AC voltage sensor
    Voltage,
    /// AC current sensor
    Current,
}

impl AnalogChannel {
    /// All analog channels in sampling order
    pub const ALL: [AnalogChannel; 3] = [Self::Light, Self::Voltage, Self::Current];

    /// Channel name for logs
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Voltage => "voltage",
            Self::Current => "current",
        }
    }
}

impl From<AnalogChannel> for Channel {
    fn from(channel: AnalogChannel) -> Self {
        match channel {
            AnalogChannel::Light => Channel::Light,
            AnalogChannel::Voltage => Channel::Voltage,
            AnalogChannel::Current => Channel::Current,
        }
    }
}

impl fmt::Display for AnalogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Channel::from(*self).fmt(f)
    }
}

/// A usable temperature/humidity reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateSample {
    /// Air temperature (°C)
    pub temperature: f32,
    /// Relative humidity (%RH)
    pub humidity: f32,
}

impl ClimateSample {
    /// Validate a driver reading; NaN or infinity in either value rejects both
    pub fn from_driver(temperature: f32, humidity: f32) -> SensorResult<Self> {
        let sample = Self {
            temperature,
            humidity,
        };
        if sample.is_valid() {
            Ok(sample)
        } else {
            Err(SensorError::Unavailable {
                channel: Channel::Climate,
            })
        }
    }

    /// Both values are finite numbers
    pub fn is_valid(&self) -> bool {
        self.temperature.is_finite() && self.humidity.is_finite()
    }
}

/// One read of every channel: the pure input of the computation chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSamples {
    /// Climate reading
    pub climate: SensorResult<ClimateSample>,
    /// Raw light code
    pub light: SensorResult<u16>,
    /// Raw voltage code
    pub voltage: SensorResult<u16>,
    /// Raw current code
    pub current: SensorResult<u16>,
}

impl RawSamples {
    /// Samples from a climate driver pair and three available analog codes
    pub fn new(climate: (f32, f32), light: u16, voltage: u16, current: u16) -> Self {
        Self {
            climate: ClimateSample::from_driver(climate.0, climate.1),
            light: Ok(light),
            voltage: Ok(voltage),
            current: Ok(current),
        }
    }

    /// Raw code of an analog channel
    pub fn analog(&self, channel: AnalogChannel) -> SensorResult<u16> {
        match channel {
            AnalogChannel::Light => self.light,
            AnalogChannel::Voltage => self.voltage,
            AnalogChannel::Current => self.current,
        }
    }
}

/// Uniform read access to the sensing hardware
pub struct SampleSource<A, C> {
    analog: A,
    climate: C,
    adc_max: u16,
}

impl<A, C> SampleSource<A, C>
where
    A: AnalogInput,
    C: ClimateSensor,
{
    /// Wrap an ADC and a climate sensor; codes above `adc_max` are saturated
    pub fn new(analog: A, climate: C, adc_max: u16) -> Self {
        Self {
            analog,
            climate,
            adc_max,
        }
    }

    /// Blocking read of one analog channel
    pub fn read_analog(&mut self, channel: AnalogChannel) -> SensorResult<u16> {
        match nb::block!(self.analog.sample_channel(channel)) {
            Ok(raw) => Ok(raw.min(self.adc_max)),
            Err(_) => {
                log_warn!("{} channel read failed", channel.as_str());
                Err(SensorError::Unavailable {
                    channel: channel.into(),
                })
            }
        }
    }

    /// Read the climate sensor
    pub fn read_climate(&mut self) -> SensorResult<ClimateSample> {
        let (temperature, humidity) = self.climate.read_climate();
        let sample = ClimateSample::from_driver(temperature, humidity);
        if sample.is_err() {
            log_warn!("climate sensor returned no data");
        }
        sample
    }

    /// Read every channel once
    pub fn snapshot(&mut self) -> RawSamples {
        RawSamples {
            climate: self.read_climate(),
            light: self.read_analog(AnalogChannel::Light),
            voltage: self.read_analog(AnalogChannel::Voltage),
            current: self.read_analog(AnalogChannel::Current),
        }
    }

    /// Full-scale code used for saturation
    pub fn adc_max(&self) -> u16 {
        self.adc_max
    }

    /// Mutable access to the ADC
    pub fn analog_mut(&mut self) -> &mut A {
        &mut self.analog
    }

    /// Mutable access to the climate sensor
    pub fn climate_mut(&mut self) -> &mut C {
        &mut self.climate
    }

    /// Give the drivers back
    pub fn into_parts(self) -> (A, C) {
        (self.analog, self.climate)
    }
}
