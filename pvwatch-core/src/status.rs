//! Status Classifier
//!
//! Maps a cycle's grid voltage and active power to one plant status, in
//! strict priority order (first match wins):
//!
//! | # | Condition                              | Status       |
//! |---|----------------------------------------|--------------|
//! | 1 | `0 < V < 180` or `V > 250`             | `GRID FAULT` |
//! | 2 | `P > 5000`                             | `HIGH LOAD`  |
//! | 3 | `P > 1000`                             | `NORMAL`     |
//! | 4 | `P > 100`                              | `LOW LOAD`   |
//! | 5 | otherwise                              | `STANDBY`    |
//!
//! A grid voltage of exactly 0 means no measurable grid reading (nothing
//! connected, or a reading rejected by the plausibility ceiling). It skips
//! rule 1 and falls through to the power rules.
//!
//! The classifier keeps no state; it is total and deterministic. It only
//! produces a label, there is no relay to drive.

use core::fmt;

use crate::constants::electrical::{
    GRID_VOLTAGE_MAX_V, GRID_VOLTAGE_MIN_V, HIGH_LOAD_W, LOW_LOAD_W, NORMAL_LOAD_W,
};
use crate::record::DataRecord;

/// Overall plant status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlantStatus {
    /// Grid voltage outside the healthy band
    GridFault,
    /// Heavy load
    HighLoad,
    /// Normal operation
    Normal,
    /// Light load
    LowLoad,
    /// No significant load
    Standby,
}

impl PlantStatus {
    /// Every status, highest priority first
    pub const ALL: [PlantStatus; 5] = [
        Self::GridFault,
        Self::HighLoad,
        Self::Normal,
        Self::LowLoad,
        Self::Standby,
    ];

    /// Human-readable label shown on the display
    pub const fn label(&self) -> &'static str {
        match self {
            Self::GridFault => "GRID FAULT",
            Self::HighLoad => "HIGH LOAD",
            Self::Normal => "NORMAL",
            Self::LowLoad => "LOW LOAD",
            Self::Standby => "STANDBY",
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusThresholds {
    /// Lowest healthy grid voltage (V)
    pub grid_min_v: f32,
    /// Highest healthy grid voltage (V)
    pub grid_max_v: f32,
    /// High load above this power (W)
    pub high_load_w: f32,
    /// Normal operation above this power (W)
    pub normal_w: f32,
    /// Low load above this power (W)
    pub low_load_w: f32,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            grid_min_v: GRID_VOLTAGE_MIN_V,
            grid_max_v: GRID_VOLTAGE_MAX_V,
            high_load_w: HIGH_LOAD_W,
            normal_w: NORMAL_LOAD_W,
            low_load_w: LOW_LOAD_W,
        }
    }
}

impl StatusThresholds {
    /// Classify a grid voltage / active power pair
    pub fn classify(&self, grid_voltage: f32, active_power: f32) -> PlantStatus {
        let grid_present = grid_voltage != 0.0;
        if grid_present && (grid_voltage < self.grid_min_v || grid_voltage > self.grid_max_v) {
            PlantStatus::GridFault
        } else if active_power > self.high_load_w {
            PlantStatus::HighLoad
        } else if active_power > self.normal_w {
            PlantStatus::Normal
        } else if active_power > self.low_load_w {
            PlantStatus::LowLoad
        } else {
            PlantStatus::Standby
        }
    }
}

/// Classify a record with the default thresholds
pub fn classify(record: &DataRecord) -> PlantStatus {
    StatusThresholds::default().classify(record.grid_voltage, record.active_power)
}
