use std::fmt;
use std::io::Write;
use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error};

use crate::event::Event;
use crate::report::{ReportError, Reporter, SummarySettings};

/// Statistical digest of all requests seen by a [`SummaryAggregator`]
///
/// Averages are `NaN` when no requests were added.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    requests: usize,
    average_nanos: f64,
    average_bytes_out: f64,
    average_bytes_in: f64,
    success_ratio: f64,
    histogram: Vec<(u16, usize)>,
    errors: Vec<String>,
}

impl Summary {
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Average request time in seconds
    pub fn average_time(&self) -> f64 {
        self.average_nanos / 1e9
    }

    pub fn average_nanos(&self) -> f64 {
        self.average_nanos
    }

    pub fn average_bytes_out(&self) -> f64 {
        self.average_bytes_out
    }

    pub fn average_bytes_in(&self) -> f64 {
        self.average_bytes_in
    }

    pub fn success_ratio(&self) -> f64 {
        self.success_ratio
    }

    /// Occurrences of each status code as `(code, count)` pairs
    pub fn histogram(&self) -> &[(u16, usize)] {
        &self.histogram
    }

    /// Distinct error messages
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results:")?;
        match self.average_nanos.is_finite() {
            // truncated to whole nanoseconds
            true => writeln!(
                f,
                "Time      (avg): {:?}",
                Duration::from_nanos(self.average_nanos as u64)
            )?,
            false => writeln!(f, "Time      (avg): {}", self.average_nanos)?,
        }
        writeln!(f, "Bytes out (avg): {:.6}", self.average_bytes_out)?;
        writeln!(f, "Bytes in  (avg): {:.6}", self.average_bytes_in)?;
        writeln!(f, "Success ratio:   {:.6}", self.success_ratio)?;
        writeln!(f, "Requests:        {}", self.requests)?;
        writeln!(f)?;
        writeln!(f, "Status codes histogram:")?;
        for (code, count) in &self.histogram {
            writeln!(f, "{code:>3}\t{count}")?;
        }
        writeln!(f)?;
        writeln!(f, "Error set:")?;
        for error in &self.errors {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Reporter folding every event into running totals
///
/// Order of arrival does not matter, the digest is computed on [`Reporter::report`].
#[derive(Debug, Default)]
pub struct SummaryAggregator {
    settings: SummarySettings,
    events: Vec<Event>,
    requests: usize,
    total_time: Duration,
    total_bytes_out: u64,
    total_bytes_in: u64,
    successful: usize,
    histogram: FxHashMap<u16, usize>,
    errors: FxHashSet<String>,
}

impl SummaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SummarySettings) -> Self {
        let capacity = match settings.retained_events() {
            true => settings.capacity(),
            false => 0,
        };

        Self {
            settings,
            events: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &SummarySettings {
        &self.settings
    }

    /// Retained events in order of arrival
    ///
    /// Empty unless retention is enabled, events merged from an aggregator
    /// without retention are counted but not listed.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests == 0
    }

    /// Computes averages, histogram and error set of added events
    pub fn summary(&self) -> Summary {
        let requests = self.requests as f64;

        let mut histogram: Vec<_> = self
            .histogram
            .iter()
            .map(|(code, count)| (*code, *count))
            .collect();
        let mut errors: Vec<_> = self.errors.iter().cloned().collect();

        if self.settings.sorted_output() {
            histogram.sort_unstable();
            errors.sort_unstable();
        }

        Summary {
            requests: self.requests,
            average_nanos: self.total_time.as_nanos() as f64 / requests,
            average_bytes_out: self.total_bytes_out as f64 / requests,
            average_bytes_in: self.total_bytes_in as f64 / requests,
            success_ratio: self.successful as f64 / requests,
            histogram,
            errors,
        }
    }

    /// Folds accumulated totals into `other`
    ///
    /// Events are carried over only when both aggregators retain them,
    /// so `other.events()` may hold fewer entries than `other.len()`.
    pub fn merge_into(self, other: &mut Self) {
        other.requests = other.requests.saturating_add(self.requests);
        other.total_time = other.total_time.saturating_add(self.total_time);
        other.total_bytes_out = other.total_bytes_out.saturating_add(self.total_bytes_out);
        other.total_bytes_in = other.total_bytes_in.saturating_add(self.total_bytes_in);
        other.successful = other.successful.saturating_add(self.successful);

        for (code, count) in self.histogram {
            let total = other.histogram.entry(code).or_default();
            *total = total.saturating_add(count);
        }

        other.errors.extend(self.errors);

        if other.settings.retained_events() {
            other.events.extend(self.events);
        }
    }
}

impl Reporter for SummaryAggregator {
    fn add(&mut self, event: Event) {
        self.requests = self.requests.saturating_add(1);
        self.total_time = self.total_time.saturating_add(event.timing());
        self.total_bytes_out = self.total_bytes_out.saturating_add(event.bytes_out());
        self.total_bytes_in = self.total_bytes_in.saturating_add(event.bytes_in());

        if event.is_success() {
            self.successful = self.successful.saturating_add(1);
        }

        let count = self.histogram.entry(event.status_code()).or_default();
        *count = count.saturating_add(1);

        if let Some(error) = event.error() {
            self.errors.insert(error.to_string());
        }

        if self.settings.retained_events() {
            self.events.push(event);
        }
    }

    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError> {
        let summary = self.summary();

        debug!(
            requests = summary.requests(),
            status_codes = summary.histogram().len(),
            errors = summary.errors().len(),
            "Writing summary report"
        );

        sink.write_all(summary.to_string().as_bytes())
            .map_err(|write_error| {
                error!(error = ?write_error, "Failed to write summary report");
                write_error
            })?;

        Ok(())
    }
}
