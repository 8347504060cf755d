//! Derived-Parameter Stage
//!
//! Secondary electrical quantities computed from validated primaries.
//! Power factor and frequency are not measured: the first is an assumption,
//! the second a stand-in for zero-crossing measurement.

use crate::constants::electrical::{
    ASSUMED_POWER_FACTOR, NOMINAL_FREQUENCY_HZ, POWER_CEILING_W, POWER_NOISE_FLOOR_W,
};

/// Derived quantities of one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParameters {
    /// Active power (W)
    pub active_power: f32,
    /// Power factor used for the computation
    pub power_factor: f32,
    /// Grid frequency (Hz)
    pub frequency: f32,
}

/// Power computation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerModel {
    /// Assumed power factor
    pub power_factor: f32,
    /// Reported grid frequency (Hz)
    pub frequency_hz: f32,
    /// Active power above this is reported as 0 (W)
    pub ceiling_w: f32,
    /// Active power below this is reported as 0 (W)
    pub noise_floor_w: f32,
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            power_factor: ASSUMED_POWER_FACTOR,
            frequency_hz: NOMINAL_FREQUENCY_HZ,
            ceiling_w: POWER_CEILING_W,
            noise_floor_w: POWER_NOISE_FLOOR_W,
        }
    }
}

impl PowerModel {
    /// Active power for a voltage/current pair, with ceiling and noise floor applied
    pub fn active_power(&self, grid_voltage: f32, load_current: f32) -> f32 {
        let power = grid_voltage * load_current * self.power_factor;
        if !power.is_finite() || power > self.ceiling_w || power < self.noise_floor_w {
            0.0
        } else {
            power
        }
    }

    /// All derived parameters for a voltage/current pair
    pub fn derive(&self, grid_voltage: f32, load_current: f32) -> DerivedParameters {
        DerivedParameters {
            active_power: self.active_power(grid_voltage, load_current),
            power_factor: self.power_factor,
            frequency: self.frequency_hz,
        }
    }
}
