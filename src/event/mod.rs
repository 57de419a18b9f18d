//! Outcome of a single measured request.

use std::time::Duration;

use chrono::{DateTime, Utc};

pub use error::RequestError;

mod error;

/// Range of status codes counted as a successful request.
pub const SUCCESS_STATUS: std::ops::Range<u16> = 200..300;

/// An `Event` describes the result of executing a single request
/// during a load test.
///
/// Events are produced by the request executor and handed over to reporters,
/// which never modify them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    status_code: u16,
    timing: Duration,
    bytes_out: u64,
    bytes_in: u64,
    timestamp: DateTime<Utc>,
    error: Option<RequestError>,
}

impl Event {
    /// Creates an event that occurred at `timestamp` without any status code
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            status_code: 0,
            timing: Duration::ZERO,
            bytes_out: 0,
            bytes_in: 0,
            timestamp,
            error: None,
        }
    }

    /// Creates an event stamped with the current wall clock time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Sets outcome code of the request, `0` stands for "no code"
    pub fn with_status_code(self, status_code: u16) -> Self {
        Self {
            status_code,
            ..self
        }
    }

    /// Sets elapsed time of the request
    pub fn with_timing(self, timing: Duration) -> Self {
        Self { timing, ..self }
    }

    pub fn with_bytes_out(self, bytes_out: u64) -> Self {
        Self { bytes_out, ..self }
    }

    pub fn with_bytes_in(self, bytes_in: u64) -> Self {
        Self { bytes_in, ..self }
    }

    /// Marks request as failed
    ///
    /// # Arguments
    ///
    /// * `error`: anything convertible into [`RequestError`], e.g. `std::io::Error` or a message
    pub fn with_error(self, error: impl Into<RequestError>) -> Self {
        Self {
            error: Some(error.into()),
            ..self
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn timing(&self) -> Duration {
        self.timing
    }

    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    /// Status code is within `[200, 300)`
    #[inline]
    pub fn is_success(&self) -> bool {
        SUCCESS_STATUS.contains(&self.status_code)
    }

    /// Request did not complete, regardless of its status code
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
