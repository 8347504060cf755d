//! Diagnostic text stream
//!
//! Writes one labeled value per line into any [`core::fmt::Write`], e.g. a
//! UART adapter on the board or a `String` on the host:
//!
//! ```text
//! Temperature: 25.3 C
//! Humidity: 60.1 %
//! Light: 50000 lx
//! ...
//! Status: NORMAL
//! ```

use core::fmt::{self, Write};

use crate::errors::SinkError;
use crate::format::Field;
use crate::record::DataRecord;
use crate::traits::RecordSink;

/// [`RecordSink`] printing records as labeled text lines
pub struct DiagnosticWriter<W> {
    out: W,
}

impl<W: Write> DiagnosticWriter<W> {
    /// Wrap an output stream
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one record followed by its status line
    pub fn write_record(&mut self, record: &DataRecord) -> fmt::Result {
        for field in Field::ALL {
            write!(self.out, "{}: ", field.label())?;
            field.write_value(&mut self.out, record)?;
            match (field.value(record), field.unit()) {
                (Some(_), unit) if !unit.is_empty() => writeln!(self.out, " {}", unit)?,
                _ => writeln!(self.out)?,
            }
        }
        writeln!(self.out, "Status: {}", record.status)
    }

    /// Borrow the stream
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Unwrap the stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for DiagnosticWriter<W> {
    fn publish(&mut self, record: &DataRecord) -> Result<(), SinkError> {
        self.write_record(record).map_err(SinkError::from)
    }
}
