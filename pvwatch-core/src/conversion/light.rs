//! Light sensor conversion
//!
//! Maps the LDR divider voltage to illuminance (lux) and irradiance (W/m²).
//!
//! The divider pulls the ADC pin *down* as light increases, so both ends of
//! the voltage range are saturation zones:
//!
//! ```text
//!  0 V ──── low guard ─────────────── high guard ──── VREF
//!  │ 50000 lux │   formula (strategy)   │   0 lux      │
//! ```
//!
//! Two formulas are in use across board revisions, selected with
//! [`LightStrategy`]. Both are clamped to `[LUX_MIN, LUX_MAX]`.

use crate::constants::light::{
    LIGHT_HIGH_GUARD_V, LIGHT_LOW_GUARD_V, LUX_INVERSE_K, LUX_MAX, LUX_MIN, LUX_PER_W_M2,
};

use super::utils;

/// Formula applied between the two guard thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightStrategy {
    /// `lux = k / voltage`, with `k` putting the curve at the maximum on the low guard
    #[default]
    Inverse,
    /// Straight line from the maximum at the low guard to zero at the high guard
    Linear,
}

/// Light channel calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightCalibration {
    /// At or below this voltage the sensor is saturated bright (V)
    pub low_guard_v: f32,
    /// At or above this voltage the sensor is saturated dark (V)
    pub high_guard_v: f32,
    /// Constant of the inverse formula (lux·V)
    pub inverse_k: f32,
    /// Formula between the guards
    pub strategy: LightStrategy,
}

impl Default for LightCalibration {
    fn default() -> Self {
        Self {
            low_guard_v: LIGHT_LOW_GUARD_V,
            high_guard_v: LIGHT_HIGH_GUARD_V,
            inverse_k: LUX_INVERSE_K,
            strategy: LightStrategy::Inverse,
        }
    }
}

impl LightCalibration {
    /// Default guards with the given formula
    pub fn with_strategy(strategy: LightStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Illuminance for a divider voltage, always within `[LUX_MIN, LUX_MAX]`
    pub fn lux(&self, voltage: f32) -> f32 {
        if voltage <= self.low_guard_v {
            return LUX_MAX;
        }
        if voltage >= self.high_guard_v {
            return LUX_MIN;
        }

        let lux = match self.strategy {
            LightStrategy::Inverse => self.inverse_k / voltage,
            LightStrategy::Linear => {
                LUX_MAX * (self.high_guard_v - voltage) / (self.high_guard_v - self.low_guard_v)
            }
        };

        utils::clamp(lux, LUX_MIN, LUX_MAX)
    }
}

/// Irradiance (W/m²) from illuminance
#[inline]
pub fn irradiance(lux: f32) -> f32 {
    utils::clamp(lux, LUX_MIN, LUX_MAX) / LUX_PER_W_M2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn guards_are_exact() {
        for strategy in [LightStrategy::Inverse, LightStrategy::Linear] {
            let cal = LightCalibration::with_strategy(strategy);
            assert_eq!(cal.lux(0.0), LUX_MAX);
            assert_eq!(cal.lux(LIGHT_LOW_GUARD_V), LUX_MAX);
            assert_eq!(cal.lux(0.05), LUX_MAX);
            assert_eq!(cal.lux(LIGHT_HIGH_GUARD_V), LUX_MIN);
            assert_eq!(cal.lux(3.3), LUX_MIN);
        }
    }

    #[test]
    fn inverse_formula() {
        let cal = LightCalibration::with_strategy(LightStrategy::Inverse);
        // 5000 lux·V / 1.0 V
        assert_relative_eq!(cal.lux(1.0), 5000.0, epsilon = 0.01);
        assert_relative_eq!(cal.lux(2.0), 2500.0, epsilon = 0.01);
    }

    #[test]
    fn linear_formula_midpoint() {
        let cal = LightCalibration::with_strategy(LightStrategy::Linear);
        let mid = (LIGHT_LOW_GUARD_V + LIGHT_HIGH_GUARD_V) / 2.0;
        assert_relative_eq!(cal.lux(mid), LUX_MAX / 2.0, epsilon = 1.0);
    }

    #[test]
    fn brighter_means_lower_voltage() {
        for strategy in [LightStrategy::Inverse, LightStrategy::Linear] {
            let cal = LightCalibration::with_strategy(strategy);
            assert!(cal.lux(0.5) > cal.lux(1.5));
            assert!(cal.lux(1.5) > cal.lux(3.0));
        }
    }

    #[test]
    fn irradiance_of_saturated_sensor() {
        assert_relative_eq!(irradiance(LUX_MAX), 416.666_66, epsilon = 0.001);
        assert_eq!(irradiance(0.0), 0.0);
    }
}
