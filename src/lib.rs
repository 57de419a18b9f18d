//! Aggregation of load test request results into summary and chronological reports.
//!
//! Request executors produce an [`Event`](event::Event) per completed request,
//! reporters accumulate them and render a plain text report once the run is over:
//!
//! ```
//! use std::time::Duration;
//! use loadtally::prelude::*;
//!
//! let mut reporter = SummaryAggregator::new().and(ChronologicalAggregator::new());
//!
//! reporter.add(
//!     Event::now()
//!         .with_status_code(200)
//!         .with_timing(Duration::from_millis(12))
//!         .with_bytes_in(512),
//! );
//!
//! let mut output = Vec::new();
//! reporter.report(&mut output).unwrap();
//! ```
#![warn(missing_debug_implementations, unreachable_pub)]

pub mod collector;
pub mod event;
pub mod report;

#[cfg(any(feature = "test_util", test))]
pub mod test_util;

pub mod prelude {
    pub use crate::collector::{self, CollectError, CollectorHandle, EventSender};
    pub use crate::event::{Event, RequestError};
    pub use crate::report::{
        AsyncReporter, ChronologicalAggregator, CombinedReporter, ReportError, Reporter,
        Summary, SummaryAggregator, SummarySettings,
    };
}
