use std::io::Write;

use crate::event::Event;
use crate::report::{ReportError, Reporter};

/// Pair of reporters consuming the same event stream
#[derive(Debug, Default)]
pub struct CombinedReporter<L, R>(L, R);

impl<L, R> CombinedReporter<L, R>
where
    L: Reporter,
    R: Reporter,
{
    pub fn new(left: L, right: R) -> Self {
        Self(left, right)
    }

    pub fn unwrap(self) -> (L, R) {
        (self.0, self.1)
    }
}

impl<L, R> Reporter for CombinedReporter<L, R>
where
    L: Reporter,
    R: Reporter,
{
    #[inline]
    fn add(&mut self, event: Event) {
        self.0.add(event.clone());
        self.1.add(event)
    }

    fn report(&self, sink: &mut dyn Write) -> Result<(), ReportError> {
        self.0.report(sink)?;
        self.1.report(sink)
    }
}
