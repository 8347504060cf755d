//! 128×64 monochrome display renderer
//!
//! Layout, `FONT_6X10`, y is the text baseline:
//!
//! ```text
//!  y=8    NORMAL            (status, centered)
//!  y=11   ────────────────  (separator)
//!  y=21   T:25.3C H:60.1%
//!  y=31   L:50000lx E:416.7
//!  y=41   V:230.0V I:12.34A
//!  y=51   P:900.5W PF:0.90
//!  y=61   F:50.0Hz
//! ```
//!
//! The panel driver is abstracted as a [`FrameTarget`]: an
//! `embedded-graphics` draw target over a frame buffer that is cleared at
//! the start of each frame and transferred at the end.

use core::fmt::{self, Write};

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};
use heapless::{String, Vec};

use crate::errors::SinkError;
use crate::format::Field;
use crate::record::DataRecord;
use crate::traits::RecordSink;

/// Panel width (px)
pub const DISPLAY_WIDTH: u32 = 128;
/// Panel height (px)
pub const DISPLAY_HEIGHT: u32 = 64;

/// Capacity of one composed text line
pub const LINE_CAPACITY: usize = 32;

/// Number of value lines below the separator
pub const VALUE_LINES: usize = 5;

const HEADER_Y: i32 = 8;
const SEPARATOR_Y: i32 = 11;
const FIRST_LINE_Y: i32 = 21;
const LINE_PITCH: i32 = 10;

const LAYOUT: [&[Field]; VALUE_LINES] = [
    &[Field::Temperature, Field::Humidity],
    &[Field::LightIntensity, Field::Irradiance],
    &[Field::GridVoltage, Field::LoadCurrent],
    &[Field::ActivePower, Field::PowerFactor],
    &[Field::Frequency],
];

/// Buffered monochrome display
pub trait FrameTarget: DrawTarget<Color = BinaryColor> {
    /// Blank the frame buffer
    fn clear_buffer(&mut self);

    /// Transfer the frame buffer to the panel
    fn send_buffer(&mut self) -> Result<(), Self::Error>;
}

/// One composed text line
pub type DisplayLine = String<LINE_CAPACITY>;

/// Compose the value lines for a record
pub fn compose_lines(record: &DataRecord) -> Result<Vec<DisplayLine, VALUE_LINES>, fmt::Error> {
    let mut lines = Vec::new();
    for fields in LAYOUT {
        let mut line = DisplayLine::new();
        for (i, &field) in fields.iter().enumerate() {
            if i > 0 {
                line.write_char(' ')?;
            }
            write_field(&mut line, field, record)?;
        }
        lines.push(line).map_err(|_| fmt::Error)?;
    }
    Ok(lines)
}

fn write_field(line: &mut DisplayLine, field: Field, record: &DataRecord) -> fmt::Result {
    write!(line, "{}:", field.short_label())?;
    field.write_value(line, record)?;
    if field.value(record).is_some() && field != Field::Irradiance {
        line.write_str(field.unit())?;
    }
    Ok(())
}

/// [`RecordSink`] drawing each record as one frame
pub struct DisplayRenderer<F> {
    target: F,
}

impl<F: FrameTarget> DisplayRenderer<F> {
    /// Wrap a display
    pub fn new(target: F) -> Self {
        Self { target }
    }

    /// Draw and transfer one frame
    pub fn render(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        let lines = compose_lines(record)?;
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        self.target.clear_buffer();

        Text::with_alignment(
            record.status.label(),
            Point::new(DISPLAY_WIDTH as i32 / 2, HEADER_Y),
            style,
            Alignment::Center,
        )
        .draw(&mut self.target)
        .map_err(|_| draw_failed())?;

        Line::new(
            Point::new(0, SEPARATOR_Y),
            Point::new(DISPLAY_WIDTH as i32 - 1, SEPARATOR_Y),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut self.target)
        .map_err(|_| draw_failed())?;

        let mut y = FIRST_LINE_Y;
        for line in &lines {
            Text::new(line, Point::new(0, y), style)
                .draw(&mut self.target)
                .map_err(|_| draw_failed())?;
            y += LINE_PITCH;
        }

        self.target.send_buffer().map_err(|_| SinkError::Display {
            reason: "frame transfer failed",
        })
    }

    /// Borrow the display
    pub fn target(&self) -> &F {
        &self.target
    }

    /// Unwrap the display
    pub fn into_inner(self) -> F {
        self.target
    }
}

fn draw_failed() -> SinkError {
    SinkError::Display {
        reason: "draw failed",
    }
}

impl<F: FrameTarget> RecordSink for DisplayRenderer<F> {
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        self.render(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::pipeline::Pipeline;
    use crate::source::RawSamples;
    use core::convert::Infallible;

    struct Panel {
        pixels: [[bool; DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize],
        frames: u32,
        fail_transfer: bool,
    }

    impl Panel {
        fn new() -> Self {
            Self {
                pixels: [[false; DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize],
                frames: 0,
                fail_transfer: false,
            }
        }

        fn lit_in_rows(&self, rows: core::ops::Range<usize>) -> bool {
            self.pixels[rows].iter().any(|row| row.iter().any(|&p| p))
        }
    }

    impl OriginDimensions for Panel {
        fn size(&self) -> Size {
            Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        }
    }

    impl DrawTarget for Panel {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                    if x < DISPLAY_WIDTH as usize && y < DISPLAY_HEIGHT as usize {
                        self.pixels[y][x] = color.is_on();
                    }
                }
            }
            Ok(())
        }
    }

    impl FrameTarget for Panel {
        fn clear_buffer(&mut self) {
            self.pixels = [[false; DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize];
        }

        fn send_buffer(&mut self) -> Result<(), Self::Error> {
            self.frames += 1;
            Ok(())
        }
    }

    struct DeadLink;

    impl OriginDimensions for DeadLink {
        fn size(&self) -> Size {
            Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        }
    }

    impl DrawTarget for DeadLink {
        type Color = BinaryColor;
        type Error = ();

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }
    }

    impl FrameTarget for DeadLink {
        fn clear_buffer(&mut self) {}

        fn send_buffer(&mut self) -> Result<(), Self::Error> {
            Err(())
        }
    }

    fn record() -> DataRecord {
        let pipeline = Pipeline::new(&MonitorConfig::default()).unwrap();
        pipeline.process(&RawSamples::new((25.3, 60.1), 62, 2048, 2048))
    }

    #[test]
    fn composes_five_lines() {
        let lines = compose_lines(&record()).unwrap();
        assert_eq!(lines.len(), VALUE_LINES);
        assert_eq!(lines[0], "T:25.3C H:60.1%");
        assert_eq!(lines[1], "L:50000lx E:416.7");
        assert_eq!(lines[2], "V:0.0V I:0.00A");
        assert_eq!(lines[3], "P:0.0W PF:0.90");
        assert_eq!(lines[4], "F:50.0Hz");
    }

    #[test]
    fn lines_fit_the_panel() {
        let max_chars = (DISPLAY_WIDTH / 6) as usize;
        for line in compose_lines(&record()).unwrap() {
            assert!(line.len() <= max_chars, "{} too wide", line);
        }
    }

    #[test]
    fn unavailable_fields_show_error() {
        let mut r = record();
        r.dht_error = true;
        let lines = compose_lines(&r).unwrap();
        assert_eq!(lines[0], "T:ERROR H:ERROR");
    }

    #[test]
    fn renders_one_frame() {
        let mut renderer = DisplayRenderer::new(Panel::new());
        renderer.publish(&record()).unwrap();

        let panel = renderer.into_inner();
        assert_eq!(panel.frames, 1);
        assert!(panel.pixels[SEPARATOR_Y as usize].iter().all(|&p| p));
        assert!(panel.lit_in_rows(0..SEPARATOR_Y as usize));
        assert!(panel.lit_in_rows(12..DISPLAY_HEIGHT as usize));
    }

    #[test]
    fn transfer_failure_is_reported() {
        let mut renderer = DisplayRenderer::new(DeadLink);
        assert_eq!(
            renderer.publish(&record()),
            Err(SinkError::Display {
                reason: "frame transfer failed"
            })
        );
    }
}
