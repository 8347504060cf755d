//! Startup Calibration Stage
//!
//! ## Overview
//!
//! Runs exactly once, before the first production cycle:
//!
//! 1. **Settle**: read and discard `settle_samples` rounds from every analog
//!    channel, `settle_interval_ms` apart, while the input networks charge up
//!    after power-on.
//! 2. **Baseline** ([`CalibrationMode::Baseline`] only): read
//!    `baseline_samples` more rounds, drop readings inside the rail guard
//!    band (a stuck or floating input), and average the rest per channel.
//! 3. **Pre-populate**: the baseline codes go through the steady-state
//!    conversion to produce the first Data Record.
//!
//! ## Failure Semantics
//!
//! Calibration never fails. A channel with no usable baseline sample gets the
//! mid-scale code and a [`CalibrationWarning`] in the report:
//!
//! ```rust
//! use pvwatch_core::calibration::BaselineAccumulator;
//! use pvwatch_core::source::AnalogChannel;
//!
//! let mut acc = BaselineAccumulator::new(4095, 10);
//! for raw in [5, 4090, 3, 4095] {
//!     acc.push(raw);
//! }
//! let (baseline, warning) = acc.finish(AnalogChannel::Light);
//! assert_eq!(baseline.raw, 2048);
//! assert!(warning.is_some());
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::constants::adc::{
    BASELINE_INTERVAL_MS, BASELINE_SAMPLES, RAIL_GUARD, SETTLE_INTERVAL_MS, SETTLE_SAMPLES,
};
use crate::errors::{CalibrationWarning, SensorResult};
use crate::source::{AnalogChannel, ClimateSample, RawSamples, SampleSource};
use crate::traits::{AnalogInput, ClimateSensor};

/// Which calibration steps run at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationMode {
    /// Discard the settling burst only
    #[default]
    SettleOnly,
    /// Settle, then average a baseline per channel
    Baseline,
}

/// Calibration parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationSettings {
    /// Steps to run
    pub mode: CalibrationMode,
    /// Rounds discarded while settling
    pub settle_samples: u16,
    /// Delay between settling rounds (ms)
    pub settle_interval_ms: u32,
    /// Rounds averaged for the baseline
    pub baseline_samples: u16,
    /// Delay between baseline rounds (ms)
    pub baseline_interval_ms: u32,
    /// Guard band around both rails (raw codes)
    pub rail_guard: u16,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            mode: CalibrationMode::SettleOnly,
            settle_samples: SETTLE_SAMPLES,
            settle_interval_ms: SETTLE_INTERVAL_MS,
            baseline_samples: BASELINE_SAMPLES,
            baseline_interval_ms: BASELINE_INTERVAL_MS,
            rail_guard: RAIL_GUARD,
        }
    }
}

/// Running sum and count of accepted baseline samples for one channel
#[derive(Debug, Clone)]
pub struct BaselineAccumulator {
    sum: u32,
    count: u16,
    rejected: u16,
    adc_max: u16,
    rail_guard: u16,
}

impl BaselineAccumulator {
    /// Empty accumulator for an ADC range and rail guard band
    pub fn new(adc_max: u16, rail_guard: u16) -> Self {
        Self {
            sum: 0,
            count: 0,
            rejected: 0,
            adc_max,
            rail_guard,
        }
    }

    /// Sample sits within the guard band of either rail
    pub fn is_on_rail(&self, raw: u16) -> bool {
        raw <= self.rail_guard || raw >= self.adc_max.saturating_sub(self.rail_guard)
    }

    /// Offer a sample; returns whether it was accepted
    pub fn push(&mut self, raw: u16) -> bool {
        if self.is_on_rail(raw) {
            self.rejected = self.rejected.saturating_add(1);
            return false;
        }
        if self.count == u16::MAX {
            self.rejected = self.rejected.saturating_add(1);
            return false;
        }
        self.sum = self.sum.saturating_add(u32::from(raw));
        self.count += 1;
        true
    }

    /// Record a failed read
    pub fn reject(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    /// Accepted sample count
    pub fn accepted(&self) -> u16 {
        self.count
    }

    /// Rounded mean of the accepted samples
    pub fn mean(&self) -> Option<u16> {
        if self.count == 0 {
            return None;
        }
        let count = u32::from(self.count);
        Some(((self.sum + count / 2) / count) as u16)
    }

    /// Mid-scale code for this accumulator's ADC range
    pub fn mid_scale(&self) -> u16 {
        (self.adc_max / 2).saturating_add(1)
    }

    /// Close the accumulator: the mean, or mid-scale plus a warning
    pub fn finish(self, channel: AnalogChannel) -> (ChannelBaseline, Option<CalibrationWarning>) {
        match self.mean() {
            Some(raw) => (
                ChannelBaseline {
                    raw,
                    accepted: self.count,
                    rejected: self.rejected,
                    fell_back: false,
                },
                None,
            ),
            None => {
                let fallback = self.mid_scale();
                (
                    ChannelBaseline {
                        raw: fallback,
                        accepted: 0,
                        rejected: self.rejected,
                        fell_back: true,
                    },
                    Some(CalibrationWarning::NoValidSamples {
                        channel: channel.into(),
                        fallback,
                    }),
                )
            }
        }
    }
}

/// Baseline outcome of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelBaseline {
    /// Baseline raw code
    pub raw: u16,
    /// Samples that went into the average
    pub accepted: u16,
    /// Samples dropped as rail readings, failed reads or past the count limit
    pub rejected: u16,
    /// Mid-scale substituted for a missing average
    pub fell_back: bool,
}

/// Baselines of every analog channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Baseline {
    /// Light channel
    pub light: ChannelBaseline,
    /// Voltage channel
    pub voltage: ChannelBaseline,
    /// Current channel
    pub current: ChannelBaseline,
}

impl Baseline {
    /// Baseline of one channel
    pub fn channel(&self, channel: AnalogChannel) -> &ChannelBaseline {
        match channel {
            AnalogChannel::Light => &self.light,
            AnalogChannel::Voltage => &self.voltage,
            AnalogChannel::Current => &self.current,
        }
    }

    /// Baseline codes as a cycle's raw samples
    pub fn to_samples(&self, climate: SensorResult<ClimateSample>) -> RawSamples {
        RawSamples {
            climate,
            light: Ok(self.light.raw),
            voltage: Ok(self.voltage.raw),
            current: Ok(self.current.raw),
        }
    }
}

/// What startup calibration did
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    /// Mode that ran
    pub mode: CalibrationMode,
    /// Settling rounds discarded
    pub settle_rounds: u16,
    /// Averaged baselines (baseline mode only)
    pub baseline: Option<Baseline>,
    /// Degradations, at most one per analog channel
    pub warnings: Vec<CalibrationWarning, 3>,
}

impl CalibrationReport {
    /// At least one channel fell back to mid-scale
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Runs the startup calibration against a sample source
#[derive(Debug, Clone)]
pub struct Calibrator {
    settings: CalibrationSettings,
    adc_max: u16,
}

impl Calibrator {
    /// Calibrator for the given settings and ADC range
    pub fn new(settings: CalibrationSettings, adc_max: u16) -> Self {
        Self { settings, adc_max }
    }

    /// Settings in use
    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    /// Run every step selected by the mode
    pub fn run<A, C, D>(&self, source: &mut SampleSource<A, C>, delay: &mut D) -> CalibrationReport
    where
        A: AnalogInput,
        C: ClimateSensor,
        D: DelayNs,
    {
        log_info!(
            "calibration: settling {} rounds, {} ms apart",
            self.settings.settle_samples,
            self.settings.settle_interval_ms
        );
        self.settle(source, delay);

        let mut report = CalibrationReport {
            mode: self.settings.mode,
            settle_rounds: self.settings.settle_samples,
            baseline: None,
            warnings: Vec::new(),
        };

        if self.settings.mode == CalibrationMode::Baseline {
            let (baseline, warnings) = self.measure_baseline(source, delay);
            log_info!(
                "calibration: baseline light {} voltage {} current {}",
                baseline.light.raw,
                baseline.voltage.raw,
                baseline.current.raw
            );
            report.baseline = Some(baseline);
            report.warnings = warnings;
        }

        log_info!("calibration: done");
        report
    }

    /// Discard the settling burst
    pub fn settle<A, C, D>(&self, source: &mut SampleSource<A, C>, delay: &mut D)
    where
        A: AnalogInput,
        C: ClimateSensor,
        D: DelayNs,
    {
        for _ in 0..self.settings.settle_samples {
            for channel in AnalogChannel::ALL {
                let _ = source.read_analog(channel);
            }
            delay.delay_ms(self.settings.settle_interval_ms);
        }
    }

    /// Average a baseline per channel, falling back to mid-scale where nothing is usable
    pub fn measure_baseline<A, C, D>(
        &self,
        source: &mut SampleSource<A, C>,
        delay: &mut D,
    ) -> (Baseline, Vec<CalibrationWarning, 3>)
    where
        A: AnalogInput,
        C: ClimateSensor,
        D: DelayNs,
    {
        let mut accumulators = AnalogChannel::ALL
            .map(|_| BaselineAccumulator::new(self.adc_max, self.settings.rail_guard));

        for _ in 0..self.settings.baseline_samples {
            for (channel, acc) in AnalogChannel::ALL.into_iter().zip(accumulators.iter_mut()) {
                match source.read_analog(channel) {
                    Ok(raw) => {
                        acc.push(raw);
                    }
                    Err(_) => acc.reject(),
                }
            }
            delay.delay_ms(self.settings.baseline_interval_ms);
        }

        let mut warnings = Vec::new();
        let [light, voltage, current] = accumulators;
        let mut close = |acc: BaselineAccumulator, channel: AnalogChannel| {
            let (baseline, warning) = acc.finish(channel);
            if let Some(warning) = warning {
                log_warn!(
                    "calibration: no valid {} samples, using mid-scale {}",
                    channel.as_str(),
                    baseline.raw
                );
                // Capacity matches the channel count.
                let _ = warnings.push(warning);
            }
            baseline
        };

        let baseline = Baseline {
            light: close(light, AnalogChannel::Light),
            voltage: close(voltage, AnalogChannel::Voltage),
            current: close(current, AnalogChannel::Current),
        };

        (baseline, warnings)
    }
}
