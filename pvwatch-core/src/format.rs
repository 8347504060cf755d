//! Field presentation shared by the display and the diagnostic stream
//!
//! Both consumers print the same quantities with the same fixed precision,
//! and both print `ERROR` in place of a value whose channel was unavailable.

use core::fmt;

use crate::record::DataRecord;

/// Text shown in place of an unavailable value
pub const ERROR_TEXT: &str = "ERROR";

/// A presentable quantity of the Data Record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Air temperature
    Temperature,
    /// Relative humidity
    Humidity,
    /// Illuminance
    LightIntensity,
    /// Irradiance
    Irradiance,
    /// Grid voltage
    GridVoltage,
    /// Load current
    LoadCurrent,
    /// Active power
    ActivePower,
    /// Power factor
    PowerFactor,
    /// Grid frequency
    Frequency,
}

impl Field {
    /// Presentation order
    pub const ALL: [Field; 9] = [
        Field::Temperature,
        Field::Humidity,
        Field::LightIntensity,
        Field::Irradiance,
        Field::GridVoltage,
        Field::LoadCurrent,
        Field::ActivePower,
        Field::PowerFactor,
        Field::Frequency,
    ];

    /// Long label for the diagnostic stream
    pub fn label(self) -> &'static str {
        match self {
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::LightIntensity => "Light",
            Field::Irradiance => "Irradiance",
            Field::GridVoltage => "Voltage",
            Field::LoadCurrent => "Current",
            Field::ActivePower => "Power",
            Field::PowerFactor => "Power Factor",
            Field::Frequency => "Frequency",
        }
    }

    /// Short label for the display
    pub fn short_label(self) -> &'static str {
        match self {
            Field::Temperature => "T",
            Field::Humidity => "H",
            Field::LightIntensity => "L",
            Field::Irradiance => "E",
            Field::GridVoltage => "V",
            Field::LoadCurrent => "I",
            Field::ActivePower => "P",
            Field::PowerFactor => "PF",
            Field::Frequency => "F",
        }
    }

    /// Unit suffix, empty for dimensionless quantities
    pub fn unit(self) -> &'static str {
        match self {
            Field::Temperature => "C",
            Field::Humidity => "%",
            Field::LightIntensity => "lx",
            Field::Irradiance => "W/m2",
            Field::GridVoltage => "V",
            Field::LoadCurrent => "A",
            Field::ActivePower => "W",
            Field::PowerFactor => "",
            Field::Frequency => "Hz",
        }
    }

    /// Decimal places
    pub fn precision(self) -> usize {
        match self {
            Field::LightIntensity => 0,
            Field::LoadCurrent | Field::PowerFactor => 2,
            _ => 1,
        }
    }

    /// The field's value, or `None` when its channel was unavailable
    pub fn value(self, record: &DataRecord) -> Option<f32> {
        let (value, failed) = match self {
            Field::Temperature => (record.temperature, record.dht_error),
            Field::Humidity => (record.humidity, record.dht_error),
            Field::LightIntensity => (record.light_intensity, record.ldr_error),
            Field::Irradiance => (record.irradiance, record.ldr_error),
            Field::GridVoltage => (record.grid_voltage, record.voltage_error),
            Field::LoadCurrent => (record.load_current, record.current_error),
            Field::ActivePower => (record.active_power, false),
            Field::PowerFactor => (record.power_factor, false),
            Field::Frequency => (record.frequency, false),
        };
        if failed {
            None
        } else {
            Some(value)
        }
    }

    /// Write the value at fixed precision, or [`ERROR_TEXT`]
    pub fn write_value<W: fmt::Write + ?Sized>(self, w: &mut W, record: &DataRecord) -> fmt::Result {
        match self.value(record) {
            Some(value) => write!(w, "{:.*}", self.precision(), value),
            None => w.write_str(ERROR_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::PrimaryQuantities;
    use crate::derived::DerivedParameters;
    use crate::status::PlantStatus;
    use heapless::String;

    fn record() -> DataRecord {
        DataRecord::assemble(
            PrimaryQuantities {
                temperature: 25.34,
                humidity: 60.06,
                light_intensity: 50000.0,
                irradiance: 416.666_66,
                grid_voltage: 230.04,
                load_current: 12.346,
                dht_error: false,
                ldr_error: false,
                voltage_error: false,
                current_error: false,
            },
            DerivedParameters {
                active_power: 2555.5,
                power_factor: 0.9,
                frequency: 50.0,
            },
            PlantStatus::Normal,
        )
    }

    fn render(field: Field, record: &DataRecord) -> String<16> {
        let mut out = String::new();
        field.write_value(&mut out, record).unwrap();
        out
    }

    #[test]
    fn fixed_precision() {
        let r = record();
        assert_eq!(render(Field::Temperature, &r), "25.3");
        assert_eq!(render(Field::LightIntensity, &r), "50000");
        assert_eq!(render(Field::Irradiance, &r), "416.7");
        assert_eq!(render(Field::LoadCurrent, &r), "12.35");
        assert_eq!(render(Field::PowerFactor, &r), "0.90");
        assert_eq!(render(Field::Frequency, &r), "50.0");
    }

    #[test]
    fn unavailable_channel_shows_error() {
        let mut r = record();
        r.dht_error = true;
        r.temperature = f32::NAN;
        r.humidity = f32::NAN;
        assert_eq!(render(Field::Temperature, &r), ERROR_TEXT);
        assert_eq!(render(Field::Humidity, &r), ERROR_TEXT);
        assert_eq!(render(Field::GridVoltage, &r), "230.0");
    }

    #[test]
    fn labels_are_distinct() {
        for (i, a) in Field::ALL.iter().enumerate() {
            for b in &Field::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.short_label(), b.short_label());
            }
        }
    }
}
