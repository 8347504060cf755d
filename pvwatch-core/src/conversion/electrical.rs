//! AC voltage and current conversion
//!
//! Both channels scale the ADC voltage linearly and then apply a
//! plausibility ceiling. A reading above the ceiling is reported as 0 rather
//! than flagged: on a display-only device a zero is the safe thing to show.

use libm::fabsf;

use crate::constants::electrical::{
    CURRENT_CEILING_A, CURRENT_SENSITIVITY_V_PER_A, VOLTAGE_CEILING_V, VOLTAGE_SCALE,
};

use super::utils;

/// Grid voltage channel calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoltageCalibration {
    /// ADC volts to grid RMS volts
    pub scale: f32,
    /// Conversions above this are reported as 0 (V)
    pub ceiling_v: f32,
}

impl Default for VoltageCalibration {
    fn default() -> Self {
        Self {
            scale: VOLTAGE_SCALE,
            ceiling_v: VOLTAGE_CEILING_V,
        }
    }
}

impl VoltageCalibration {
    /// Grid RMS voltage for an ADC voltage
    pub fn grid_voltage(&self, voltage: f32) -> f32 {
        let grid = voltage * self.scale;
        if grid > self.ceiling_v {
            log_debug!("grid voltage {} above ceiling, rejected", grid);
        }
        utils::reject_above(grid, self.ceiling_v)
    }
}

/// Where the zero-current level of the current sensor comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurrentZero {
    /// Half the reference voltage (the sensor's nominal quiescent output)
    #[default]
    Fixed,
    /// The averaged current baseline measured at startup
    Baseline,
}

/// Load current channel calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentCalibration {
    /// Sensor sensitivity (V/A)
    pub sensitivity_v_per_a: f32,
    /// Conversions above this are reported as 0 (A)
    pub ceiling_a: f32,
    /// Source of the zero-current offset
    pub zero: CurrentZero,
}

impl Default for CurrentCalibration {
    fn default() -> Self {
        Self {
            sensitivity_v_per_a: CURRENT_SENSITIVITY_V_PER_A,
            ceiling_a: CURRENT_CEILING_A,
            zero: CurrentZero::Fixed,
        }
    }
}

impl CurrentCalibration {
    /// Load RMS current for an ADC voltage, given the zero-current level in volts
    pub fn load_current(&self, voltage: f32, zero_offset_v: f32) -> f32 {
        let current = fabsf(voltage - zero_offset_v) / self.sensitivity_v_per_a;
        if current > self.ceiling_a {
            log_debug!("load current {} above ceiling, rejected", current);
        }
        utils::reject_above(current, self.ceiling_a)
    }
}
