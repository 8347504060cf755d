//! Known plant conditions as raw ADC codes

use pvwatch_core::{PlantStatus, RawSamples};

use super::code;

/// One plant condition and the status it must classify as
pub struct Scenario {
    pub name: &'static str,
    pub raw: RawSamples,
    pub expected: PlantStatus,
}

impl Scenario {
    fn new(name: &'static str, voltage_v: f32, current_v: f32, expected: PlantStatus) -> Self {
        Self {
            name,
            raw: RawSamples::new((24.0, 55.0), code(1.0), code(voltage_v), code(current_v)),
            expected,
        }
    }
}

/// Arguments are ADC input voltages: ~1.045 V is a 230 V grid, 1.65 V is zero current.
pub fn all() -> Vec<Scenario> {
    vec![
        // ~15.5 A → ~3.2 kW
        Scenario::new("afternoon peak", 1.045, 3.2, PlantStatus::Normal),
        // Negative half-wave reads the same magnitude, ~16 A
        Scenario::new("reversed clamp", 1.045, 0.05, PlantStatus::Normal),
        // ~5.2 A → ~1.08 kW
        Scenario::new("morning", 1.045, 2.17, PlantStatus::Normal),
        // ~2 A → ~414 W
        Scenario::new("light cloud", 1.045, 1.85, PlantStatus::LowLoad),
        // ~0.3 A → ~62 W
        Scenario::new("dusk", 1.045, 1.68, PlantStatus::Standby),
        // ~154 V
        Scenario::new("brownout", 0.7, 2.17, PlantStatus::GridFault),
        // ~264 V
        Scenario::new("overvoltage", 1.2, 2.17, PlantStatus::GridFault),
        // 0 V reading: idle, not a fault
        Scenario::new("grid disconnected", 0.0, 1.65, PlantStatus::Standby),
    ]
}
