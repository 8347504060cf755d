//! Capability traits at the hardware and presentation seams
//!
//! The pipeline never talks to a driver directly. Boards implement
//! [`AnalogInput`] and [`ClimateSensor`]; presentation layers implement
//! [`RecordSink`]. Tests implement all three with synthetic data.

use crate::errors::SinkError;
use crate::record::DataRecord;
use crate::source::AnalogChannel;

/// One-shot ADC conversion on a named channel.
///
/// Follows the `nb` convention of embedded ADC drivers: return
/// `Err(nb::Error::WouldBlock)` while the conversion is in progress. Drivers
/// that cannot fail use `core::convert::Infallible` as their error type.
pub trait AnalogInput {
    /// Driver error
    type Error;

    /// Sample one channel, yielding a code in `[0, ADC_MAX]`
    fn sample_channel(&mut self, channel: AnalogChannel) -> nb::Result<u16, Self::Error>;
}

/// Combined temperature/humidity sensor (DHT11/DHT22 class).
///
/// Either value may be NaN, the driver's "undefined" sentinel for a failed
/// read.
pub trait ClimateSensor {
    /// Read `(temperature °C, humidity %RH)`
    fn read_climate(&mut self) -> (f32, f32);
}

/// Consumer of finished Data Records (display, diagnostic stream).
pub trait RecordSink {
    /// Present one record
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    type Error = T::Error;

    fn sample_channel(&mut self, channel: AnalogChannel) -> nb::Result<u16, Self::Error> {
        (**self).sample_channel(channel)
    }
}

impl<T: ClimateSensor + ?Sized> ClimateSensor for &mut T {
    fn read_climate(&mut self) -> (f32, f32) {
        (**self).read_climate()
    }
}

impl<T: RecordSink + ?Sized> RecordSink for &mut T {
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        (**self).publish(record)
    }
}

/// Discards every record
impl RecordSink for () {
    fn publish(&mut self, _record: &DataRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Publishes to both sinks. The second sink still sees the record when the
/// first fails; the first error is returned.
impl<A: RecordSink, B: RecordSink> RecordSink for (A, B) {
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        let first = self.0.publish(record);
        let second = self.1.publish(record);
        first.and(second)
    }
}
