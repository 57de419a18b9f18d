//! Reporters accumulating request events and rendering them
//! into a byte sink at the end of a run.

use std::io::Write;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use chronological::ChronologicalAggregator;
pub use combined::CombinedReporter;
pub use settings::SummarySettings;
pub use summary::{Summary, SummaryAggregator};

use crate::event::Event;

mod chronological;
mod combined;
mod settings;
mod summary;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Sink refused to accept report bytes
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Accumulates events and renders a textual report
///
/// Implementors are not synchronized internally, a single owner
/// is expected to call [`Reporter::add`] for every event and [`Reporter::report`]
/// once all events of the run are added.
pub trait Reporter {
    /// Takes ownership of an event, never fails
    fn add(&mut self, event: Event);

    /// Writes report into provided sink
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if sink fails to accept the report
    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError>;

    /// Fans out every added event into `self` and `other`
    fn and<R>(self, other: R) -> CombinedReporter<Self, R>
    where
        Self: Sized,
        R: Reporter,
    {
        CombinedReporter::new(self, other)
    }
}

impl<R> Reporter for Box<R>
where
    R: Reporter + ?Sized,
{
    #[inline]
    fn add(&mut self, event: Event) {
        (**self).add(event)
    }

    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError> {
        (**self).report(sink)
    }
}

/// Reporters selected at runtime, reports are written one after another
impl Reporter for Vec<Box<dyn Reporter + Send>> {
    fn add(&mut self, event: Event) {
        if let Some((last, rest)) = self.split_last_mut() {
            for reporter in rest {
                reporter.add(event.clone());
            }
            last.add(event);
        }
    }

    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError> {
        for reporter in self {
            reporter.report(sink)?;
        }

        Ok(())
    }
}

/// Writes report into an asynchronous sink, like a socket or [`tokio::io::Stdout`]
#[trait_variant::make(AsyncReporter: Send)]
pub trait LocalAsyncReporter {
    async fn report_to<W: AsyncWrite + Unpin + Send>(
        &self,
        sink: &mut W,
    ) -> Result<(), ReportError>;
}

impl<R> AsyncReporter for R
where
    R: Reporter + Send + Sync,
{
    async fn report_to<W: AsyncWrite + Unpin + Send>(
        &self,
        sink: &mut W,
    ) -> Result<(), ReportError> {
        let mut buffer = Vec::new();
        self.report(&mut buffer)?;
        sink.write_all(&buffer).await?;
        sink.flush().await?;
        Ok(())
    }
}
