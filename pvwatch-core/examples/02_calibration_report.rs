//! Calibration Report Example
//!
//! Runs the bench (diagnostic) configuration against an ADC with one channel
//! stuck at the rail and shows how calibration degrades instead of failing.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_calibration_report
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use pvwatch_core::{
    AnalogChannel, AnalogInput, ClimateSensor, DiagnosticWriter, Monitor, MonitorConfig,
};

/// Small deterministic jitter around fixed codes; the current input is shorted to ground
struct BenchAdc {
    tick: u16,
}

impl AnalogInput for BenchAdc {
    type Error = Infallible;

    fn sample_channel(&mut self, channel: AnalogChannel) -> nb::Result<u16, Infallible> {
        self.tick = self.tick.wrapping_add(1);
        let jitter = self.tick % 5;
        Ok(match channel {
            AnalogChannel::Light => 1500 + jitter,
            AnalogChannel::Voltage => 1295 + jitter,
            AnalogChannel::Current => 2,
        })
    }
}

struct BenchClimate;

impl ClimateSensor for BenchClimate {
    fn read_climate(&mut self) -> (f32, f32) {
        (22.4, 41.0)
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn main() {
    println!("PVWatch Calibration Report Example");
    println!("==================================\n");

    let config = MonitorConfig::diagnostic();
    println!("Calibration settings:");
    println!("  Mode: {:?}", config.calibration.mode);
    println!(
        "  Settle: {} rounds, {} ms apart",
        config.calibration.settle_samples, config.calibration.settle_interval_ms
    );
    println!(
        "  Baseline: {} rounds, rail guard {} codes",
        config.calibration.baseline_samples, config.calibration.rail_guard
    );
    println!();

    let mut monitor = Monitor::new(config, BenchAdc { tick: 0 }, BenchClimate, NoDelay)
        .expect("diagnostic configuration is valid");

    let report = monitor.calibrate().clone();
    if let Some(baseline) = report.baseline {
        println!("Baselines:");
        for channel in AnalogChannel::ALL {
            let b = baseline.channel(channel);
            println!(
                "  {:<8} raw {:4}  accepted {:2}  rejected {:2}{}",
                channel.as_str(),
                b.raw,
                b.accepted,
                b.rejected,
                if b.fell_back { "  (mid-scale)" } else { "" }
            );
        }
    }

    if report.is_degraded() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }

    println!("\nFirst records (initial record from the baseline, then one cycle):");
    let mut console = DiagnosticWriter::new(String::new());
    monitor.run_cycle(&mut console);
    for line in console.into_inner().lines() {
        println!("  {}", line);
    }
}
