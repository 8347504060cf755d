//! Simulated Plant Example
//!
//! Drives the monitor through one simulated day with synthetic sensors and
//! prints each Data Record on the diagnostic stream.
//!
//! ## What You'll Learn
//!
//! - Implementing `AnalogInput` and `ClimateSensor` for your board
//! - Running the monitor loop for a bounded number of cycles
//! - Fanning records out to several sinks
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_plant
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use pvwatch_core::{
    AnalogChannel, AnalogInput, ClimateSensor, DataRecord, DiagnosticWriter, Monitor,
    MonitorConfig, RecordSink, SinkError,
};

const HOURS: u32 = 16;

/// Sun, grid and load following the hour of a simulated day
struct DayCurve {
    hour: u32,
}

impl DayCurve {
    /// 0 at dawn (hour 0), 1 at noon (hour 8), 0 at dusk (hour 16)
    fn sun(&self) -> f32 {
        let x = (self.hour as f32 - HOURS as f32 / 2.0) / (HOURS as f32 / 2.0);
        (1.0 - x * x).max(0.0)
    }

    fn code(volts: f32) -> u16 {
        (volts.clamp(0.0, 3.3) * 4095.0 / 3.3 + 0.5) as u16
    }
}

impl AnalogInput for DayCurve {
    type Error = Infallible;

    fn sample_channel(&mut self, channel: AnalogChannel) -> nb::Result<u16, Infallible> {
        let sun = self.sun();
        let volts = match channel {
            // Bright sun pulls the divider low
            AnalogChannel::Light => 3.1 - 3.0 * sun,
            // 230 V with a brownout in the ninth hour
            AnalogChannel::Voltage if self.hour == 9 => 0.75,
            AnalogChannel::Voltage => 1.045,
            // Up to ~16 A at noon
            AnalogChannel::Current => 1.65 + 1.6 * sun,
        };
        Ok(Self::code(volts))
    }
}

struct Dht22 {
    hour: u32,
}

impl ClimateSensor for Dht22 {
    fn read_climate(&mut self) -> (f32, f32) {
        // The sensor drops out once in the afternoon
        if self.hour == 12 {
            return (f32::NAN, f32::NAN);
        }
        let t = 14.0 + self.hour as f32 * 0.8;
        (t, 80.0 - t)
    }
}

/// Advances the simulated clock by one hour per sampling period
struct HourClock<'a> {
    hour: &'a core::cell::Cell<u32>,
}

impl DelayNs for HourClock<'_> {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        if ms >= 1000 {
            self.hour.set(self.hour.get() + 1);
        }
    }
}

/// Prints one status line per record
struct StatusLog;

impl RecordSink for StatusLog {
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        println!(
            "  -> {:<10} {:>7.1} W  {:>7.0} lx",
            record.status.label(),
            record.active_power,
            record.light_intensity
        );
        Ok(())
    }
}

fn main() {
    println!("PVWatch Simulated Plant Example");
    println!("===============================\n");

    let hour = core::cell::Cell::new(0);
    let mut monitor = Monitor::new(
        MonitorConfig::default(),
        DayCurve { hour: 0 },
        Dht22 { hour: 0 },
        HourClock { hour: &hour },
    )
    .expect("default configuration is valid");

    let mut console = DiagnosticWriter::new(String::new());

    for _ in 0..=HOURS {
        let h = hour.get();
        monitor.source_mut().analog_mut().hour = h;
        monitor.source_mut().climate_mut().hour = h;

        println!("Hour {:2}:", h);
        let mut sinks = (&mut console, StatusLog);
        monitor.run_cycles(&mut sinks, 1);
    }

    println!("\nLast diagnostic block:");
    let text = console.into_inner();
    let last_block: Vec<&str> = text.lines().rev().take(10).collect();
    for line in last_block.into_iter().rev() {
        println!("  {}", line);
    }

    println!("\nCycles run: {}", monitor.cycles());
}
