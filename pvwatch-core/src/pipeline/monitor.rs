//! Fixed-period monitoring loop
//!
//! Single-threaded and cooperative: each cycle samples, computes and
//! publishes to completion, then the loop blocks on the delay for one
//! sampling period. Nothing runs concurrently, so no locking is needed, and
//! a hardware read that blocks forever blocks the loop with it.

use embedded_hal::delay::DelayNs;

use crate::calibration::{CalibrationReport, Calibrator};
use crate::config::MonitorConfig;
use crate::errors::ConfigError;
use crate::record::DataRecord;
use crate::source::SampleSource;
use crate::traits::{AnalogInput, ClimateSensor, RecordSink};

use super::Pipeline;

/// Sensors, pipeline and scheduling of one plant monitor
pub struct Monitor<A, C, D> {
    source: SampleSource<A, C>,
    delay: D,
    pipeline: Pipeline,
    calibrator: Calibrator,
    sample_period_ms: u32,
    calibration: Option<CalibrationReport>,
    initial: Option<DataRecord>,
    unpublished: Option<DataRecord>,
    last: Option<DataRecord>,
    cycles: u32,
}

impl<A, C, D> Monitor<A, C, D>
where
    A: AnalogInput,
    C: ClimateSensor,
    D: DelayNs,
{
    /// Assemble a monitor; fails only on an invalid configuration
    pub fn new(config: MonitorConfig, analog: A, climate: C, delay: D) -> Result<Self, ConfigError> {
        let pipeline = Pipeline::new(&config)?;
        Ok(Self {
            source: SampleSource::new(analog, climate, config.adc_max),
            delay,
            pipeline,
            calibrator: Calibrator::new(config.calibration, config.adc_max),
            sample_period_ms: config.sample_period_ms,
            calibration: None,
            initial: None,
            unpublished: None,
            last: None,
            cycles: 0,
        })
    }

    /// Run startup calibration. Only the first call touches the hardware.
    pub fn calibrate(&mut self) -> &CalibrationReport {
        let report = match self.calibration.take() {
            Some(report) => report,
            None => self.run_calibration(),
        };
        self.calibration.insert(report)
    }

    fn run_calibration(&mut self) -> CalibrationReport {
        let report = self.calibrator.run(&mut self.source, &mut self.delay);

        if let Some(baseline) = &report.baseline {
            self.pipeline.apply_baseline(baseline);
            let climate = self.source.read_climate();
            let record = self.pipeline.process(&baseline.to_samples(climate));
            self.initial = Some(record);
            self.unpublished = Some(record);
            self.last = Some(record);
        }

        report
    }

    /// Sample every channel and compute one record, without publishing it
    pub fn sample(&mut self) -> DataRecord {
        let raw = self.source.snapshot();
        let record = self.pipeline.process(&raw);
        self.cycles = self.cycles.wrapping_add(1);
        self.last = Some(record);
        log_debug!("cycle {}: {}", self.cycles, record.status.label());
        record
    }

    /// One production cycle: sample, compute, publish.
    ///
    /// Calibrates first if that has not happened yet. The record
    /// pre-populated by baseline calibration is published ahead of the first
    /// sample, whether calibration ran here or through [`Self::calibrate`].
    /// Sink failures are logged; the record is returned either way.
    pub fn run_cycle<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> DataRecord {
        self.calibrate();
        if let Some(initial) = self.unpublished.take() {
            publish(sink, &initial);
        }

        let record = self.sample();
        publish(sink, &record);
        record
    }

    /// Run `count` cycles, waiting one sampling period after each
    pub fn run_cycles<S: RecordSink + ?Sized>(&mut self, sink: &mut S, count: u32) -> Option<DataRecord> {
        let mut last = None;
        for _ in 0..count {
            last = Some(self.run_cycle(sink));
            self.delay.delay_ms(self.sample_period_ms);
        }
        last
    }

    /// Run forever
    pub fn run<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> ! {
        log_info!("monitor: sampling every {} ms", self.sample_period_ms);
        loop {
            self.run_cycle(sink);
            self.delay.delay_ms(self.sample_period_ms);
        }
    }

    /// Most recent record, including one pre-populated by calibration
    pub fn last_record(&self) -> Option<&DataRecord> {
        self.last.as_ref()
    }

    /// Record pre-populated from the calibration baseline
    pub fn initial_record(&self) -> Option<&DataRecord> {
        self.initial.as_ref()
    }

    /// Calibration outcome, once calibration has run
    pub fn calibration_report(&self) -> Option<&CalibrationReport> {
        self.calibration.as_ref()
    }

    /// Production cycles completed
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Sampling period (ms)
    pub fn sample_period_ms(&self) -> u32 {
        self.sample_period_ms
    }

    /// The computation stages
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable access to the sample source
    pub fn source_mut(&mut self) -> &mut SampleSource<A, C> {
        &mut self.source
    }

    /// Give the drivers and the delay back
    pub fn into_parts(self) -> (A, C, D) {
        let (analog, climate) = self.source.into_parts();
        (analog, climate, self.delay)
    }
}

fn publish<S: RecordSink + ?Sized>(sink: &mut S, record: &DataRecord) {
    if let Err(err) = sink.publish(record) {
        log_warn!("sink failed: {}", err);
    }
}
