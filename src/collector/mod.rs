//! Single writer collecting events from many concurrent request workers.
//!
//! Reporters are not synchronized, so workers send their events over a channel
//! and one task owns the reporter for the whole run:
//!
//! ```
//! use loadtally::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let (sender, handle) = collector::channel(SummaryAggregator::new(), 16);
//!
//!     sender.send(Event::now().with_status_code(200)).await.unwrap();
//!     drop(sender);
//!
//!     let reporter = handle.finish().await.unwrap();
//!     assert_eq!(reporter.len(), 1);
//! }
//! ```

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::event::Event;
use crate::report::Reporter;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Collector is no longer accepting events")]
    Closed,

    #[error("Collector task failed: {0}")]
    Join(#[from] JoinError),
}

/// Sending half handed out to request workers
#[derive(Debug, Clone)]
pub struct EventSender(mpsc::Sender<Event>);

/// Owner of the collecting task
#[derive(Debug)]
pub struct CollectorHandle<R>(JoinHandle<R>);

/// Spawns a task adding every received event into `reporter`
///
/// The task finishes once every [`EventSender`] is dropped.
/// Must be called within a tokio runtime.
///
/// # Arguments
///
/// * `reporter`: reporter receiving events
/// * `buffer`: number of events that can be queued before senders wait
pub fn channel<R>(reporter: R, buffer: usize) -> (EventSender, CollectorHandle<R>)
where
    R: Reporter + Send + 'static,
{
    let (sender, mut receiver) = mpsc::channel(buffer.max(1));

    let handle = tokio::spawn(async move {
        let mut reporter = reporter;
        let mut events = 0usize;

        while let Some(event) = receiver.recv().await {
            reporter.add(event);
            events += 1;
        }

        debug!(events = events, "Event channel closed, collector finished");
        reporter
    });

    (EventSender(sender), CollectorHandle(handle))
}

impl EventSender {
    /// Queues event for the collector, waits while the queue is full
    pub async fn send(&self, event: Event) -> Result<(), CollectError> {
        self.0.send(event).await.map_err(|_| CollectError::Closed)
    }

    /// Queues event from synchronous code outside of the async runtime
    pub fn blocking_send(&self, event: Event) -> Result<(), CollectError> {
        self.0.blocking_send(event).map_err(|_| CollectError::Closed)
    }
}

impl<R> CollectorHandle<R> {
    /// Waits for all senders to be dropped and returns the reporter
    pub async fn finish(self) -> Result<R, CollectError> {
        Ok(self.0.await?)
    }

    /// Stops collecting, reporter and queued events are discarded
    pub fn abort(&self) {
        self.0.abort()
    }
}
