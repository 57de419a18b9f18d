use std::collections::vec_deque::{self, VecDeque};
use std::io::Write;

use chrono::SecondsFormat;
use tracing::{debug, error, trace};

use crate::event::Event;
use crate::report::{ReportError, Reporter};

/// Reporter keeping events ordered by timestamp as they arrive
///
/// Events completed by concurrent workers arrive nearly sorted, so appending
/// to the tail or prepending to the head is checked before searching for a position.
/// Events with equal timestamps stay in order of arrival.
#[derive(Debug, Default, Clone)]
pub struct ChronologicalAggregator {
    events: VecDeque<Event>,
}

impl ChronologicalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events from the earliest to the latest
    pub fn events(&self) -> vec_deque::Iter<'_, Event> {
        self.events.iter()
    }

    /// Inserts every event of this aggregator into `other`
    pub fn merge_into(self, other: &mut Self) {
        other.events.reserve(self.events.len());
        self.events
            .into_iter()
            .for_each(|event| other.add(event));
    }
}

impl Reporter for ChronologicalAggregator {
    fn add(&mut self, event: Event) {
        let timestamp = *event.timestamp();
        let head = self.events.front().map(|first| *first.timestamp());
        let tail = self.events.back().map(|last| *last.timestamp());

        match (head, tail) {
            (Some(head), Some(tail)) if timestamp < tail => {
                if timestamp < head {
                    self.events.push_front(event);
                    return;
                }

                let position = self
                    .events
                    .partition_point(|existing| *existing.timestamp() <= timestamp);

                trace!(
                    position = position,
                    total = self.events.len(),
                    "Inserting out of order event"
                );

                self.events.insert(position, event);
            }
            _ => self.events.push_back(event),
        }
    }

    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError> {
        debug!(events = self.events.len(), "Writing chronological report");

        let mut buffer = String::new();
        for event in &self.events {
            buffer.push_str(
                &event
                    .timestamp()
                    .to_rfc3339_opts(SecondsFormat::Nanos, true),
            );
            buffer.push('\n');
        }

        sink.write_all(buffer.as_bytes()).map_err(|write_error| {
            error!(error = ?write_error, "Failed to write chronological report");
            write_error
        })?;

        Ok(())
    }
}
