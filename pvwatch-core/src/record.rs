//! Data Record: the per-cycle snapshot
//!
//! Built fresh by the pipeline every cycle, returned by value and handed to
//! the display and diagnostic sinks as a shared reference. Nothing carries
//! over from the previous cycle.

use crate::conversion::PrimaryQuantities;
use crate::derived::DerivedParameters;
use crate::status::PlantStatus;

/// Every measured and derived quantity of one cycle, with channel error flags
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataRecord {
    /// Air temperature (°C), NaN only when `dht_error`
    pub temperature: f32,
    /// Relative humidity (%RH), NaN only when `dht_error`
    pub humidity: f32,
    /// Illuminance (lux), within [0, 50000]
    pub light_intensity: f32,
    /// Irradiance (W/m²), `light_intensity / 120`
    pub irradiance: f32,
    /// Grid RMS voltage (V), 0 when implausible
    pub grid_voltage: f32,
    /// Load RMS current (A), 0 when implausible
    pub load_current: f32,
    /// Active power (W), 0 above the ceiling or below the noise floor
    pub active_power: f32,
    /// Assumed power factor
    pub power_factor: f32,
    /// Nominal grid frequency (Hz)
    pub frequency: f32,
    /// Plant status for this record
    pub status: PlantStatus,
    /// Climate sensor unavailable
    pub dht_error: bool,
    /// Light channel unavailable
    pub ldr_error: bool,
    /// Voltage channel unavailable
    pub voltage_error: bool,
    /// Current channel unavailable
    pub current_error: bool,
}

impl DataRecord {
    /// Assemble a record from the stage outputs
    pub fn assemble(primary: PrimaryQuantities, derived: DerivedParameters, status: PlantStatus) -> Self {
        Self {
            temperature: primary.temperature,
            humidity: primary.humidity,
            light_intensity: primary.light_intensity,
            irradiance: primary.irradiance,
            grid_voltage: primary.grid_voltage,
            load_current: primary.load_current,
            active_power: derived.active_power,
            power_factor: derived.power_factor,
            frequency: derived.frequency,
            status,
            dht_error: primary.dht_error,
            ldr_error: primary.ldr_error,
            voltage_error: primary.voltage_error,
            current_error: primary.current_error,
        }
    }

    /// `(temperature, humidity)` when the climate sensor delivered
    pub fn climate(&self) -> Option<(f32, f32)> {
        if self.dht_error {
            None
        } else {
            Some((self.temperature, self.humidity))
        }
    }

    /// Any channel unavailable this cycle
    pub fn has_errors(&self) -> bool {
        self.dht_error || self.ldr_error || self.voltage_error || self.current_error
    }

    /// Bit-for-bit equality, treating NaN fields as equal to themselves
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        let floats = |r: &Self| {
            [
                r.temperature,
                r.humidity,
                r.light_intensity,
                r.irradiance,
                r.grid_voltage,
                r.load_current,
                r.active_power,
                r.power_factor,
                r.frequency,
            ]
            .map(f32::to_bits)
        };
        let flags = |r: &Self| [r.dht_error, r.ldr_error, r.voltage_error, r.current_error];

        floats(self) == floats(other) && flags(self) == flags(other) && self.status == other.status
    }
}
