//! Fixtures for testing code that feeds or consumes reporters.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::event::Event;
use crate::report::{ReportError, Reporter};

/// Whole seconds after the unix epoch as a UTC timestamp
pub fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

/// Sink refusing every write with [`io::ErrorKind::BrokenPipe`]
#[derive(Debug, Default)]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reporter remembering added events in order of arrival
///
/// Report is a single line with its name and comma separated status codes.
#[derive(Debug)]
pub struct RecordingReporter {
    name: &'static str,
    events: Vec<Event>,
}

impl RecordingReporter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Reporter for RecordingReporter {
    fn add(&mut self, event: Event) {
        self.events.push(event)
    }

    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError> {
        let codes: Vec<_> = self
            .events
            .iter()
            .map(|event| event.status_code().to_string())
            .collect();

        writeln!(sink, "{}: {}", self.name, codes.join(","))?;
        Ok(())
    }
}
