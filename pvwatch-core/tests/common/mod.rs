//! Shared fixtures for integration tests
//!
//! Synthetic drivers standing in for the board:
//! - [`ScriptedAdc`]: per-channel code sequences, with conversions that report
//!   `WouldBlock` before completing
//! - [`Dht`]: fixed climate reading, NaN to simulate a dead sensor
//! - [`RecordingDelay`]: keeps every requested delay instead of sleeping
//! - [`RecordingSink`]: keeps every published record, optionally failing

#![allow(dead_code, unused_imports)]

pub mod scenarios;

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use pvwatch_core::{AnalogChannel, AnalogInput, ClimateSensor, DataRecord, RecordSink, SinkError};

/// Raw code for an ADC input voltage at 3.3 V / 4095
pub fn code(volts: f32) -> u16 {
    (volts * 4095.0 / 3.3 + 0.5) as u16
}

/// ADC replaying one script per channel; the last code repeats forever
pub struct ScriptedAdc {
    light: Vec<u16>,
    voltage: Vec<u16>,
    current: Vec<u16>,
    cursor: [usize; 3],
    pending: bool,
    failing: Option<AnalogChannel>,
    pub reads: u32,
}

impl ScriptedAdc {
    pub fn new(light: &[u16], voltage: &[u16], current: &[u16]) -> Self {
        Self {
            light: light.to_vec(),
            voltage: voltage.to_vec(),
            current: current.to_vec(),
            cursor: [0; 3],
            pending: true,
            failing: None,
            reads: 0,
        }
    }

    /// Same code on every read
    pub fn steady(light: u16, voltage: u16, current: u16) -> Self {
        Self::new(&[light], &[voltage], &[current])
    }

    /// Every read of `channel` reports a driver fault
    pub fn failing_on(mut self, channel: AnalogChannel) -> Self {
        self.failing = Some(channel);
        self
    }

    fn next_code(&mut self, channel: AnalogChannel) -> u16 {
        let (script, index) = match channel {
            AnalogChannel::Light => (&self.light, 0),
            AnalogChannel::Voltage => (&self.voltage, 1),
            AnalogChannel::Current => (&self.current, 2),
        };
        let position = self.cursor[index].min(script.len() - 1);
        self.cursor[index] += 1;
        script[position]
    }
}

/// Driver fault of the synthetic ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcFault;

impl AnalogInput for ScriptedAdc {
    type Error = AdcFault;

    fn sample_channel(&mut self, channel: AnalogChannel) -> nb::Result<u16, AdcFault> {
        // Every conversion takes two polls
        if self.pending {
            self.pending = false;
            return Err(nb::Error::WouldBlock);
        }
        self.pending = true;
        self.reads += 1;

        if self.failing == Some(channel) {
            return Err(nb::Error::Other(AdcFault));
        }
        Ok(self.next_code(channel))
    }
}

/// ADC that cannot fail, returning the same codes forever
pub struct SteadyAdc(pub u16, pub u16, pub u16);

impl AnalogInput for SteadyAdc {
    type Error = Infallible;

    fn sample_channel(&mut self, channel: AnalogChannel) -> nb::Result<u16, Infallible> {
        Ok(match channel {
            AnalogChannel::Light => self.0,
            AnalogChannel::Voltage => self.1,
            AnalogChannel::Current => self.2,
        })
    }
}

/// Climate sensor with a fixed reading
pub struct Dht {
    pub reading: (f32, f32),
    pub reads: u32,
}

impl Dht {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            reading: (temperature, humidity),
            reads: 0,
        }
    }

    pub fn dead() -> Self {
        Self::new(f32::NAN, f32::NAN)
    }
}

impl ClimateSensor for Dht {
    fn read_climate(&mut self) -> (f32, f32) {
        self.reads += 1;
        self.reading
    }
}

/// Delay that records instead of sleeping
#[derive(Default)]
pub struct RecordingDelay {
    pub calls_ms: Vec<u32>,
    pub total_ns: u64,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Sink keeping every record
#[derive(Default)]
pub struct RecordingSink {
    pub records: Vec<DataRecord>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }
}

impl RecordSink for RecordingSink {
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        self.records.push(*record);
        if self.fail {
            Err(SinkError::Display {
                reason: "link down",
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(feature = "display")]
pub use framebuffer::FrameBuffer;

#[cfg(feature = "display")]
mod framebuffer {
    use core::convert::Infallible;

    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use pvwatch_core::display::{FrameTarget, DISPLAY_HEIGHT, DISPLAY_WIDTH};

    const W: usize = DISPLAY_WIDTH as usize;
    const H: usize = DISPLAY_HEIGHT as usize;

    /// 128×64 in-memory panel
    pub struct FrameBuffer {
        pub pixels: [[bool; W]; H],
        pub frames_sent: u32,
    }

    impl FrameBuffer {
        pub fn new() -> Self {
            Self {
                pixels: [[false; W]; H],
                frames_sent: 0,
            }
        }

        pub fn lit(&self) -> usize {
            self.pixels.iter().flatten().filter(|&&p| p).count()
        }

        pub fn row_lit(&self, y: usize) -> usize {
            self.pixels[y].iter().filter(|&&p| p).count()
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..W as i32).contains(&point.x) && (0..H as i32).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    impl FrameTarget for FrameBuffer {
        fn clear_buffer(&mut self) {
            self.pixels = [[false; W]; H];
        }

        fn send_buffer(&mut self) -> Result<(), Self::Error> {
            self.frames_sent += 1;
            Ok(())
        }
    }
}
