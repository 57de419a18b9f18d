/// Construction options of [`SummaryAggregator`](crate::report::SummaryAggregator)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummarySettings {
    capacity: usize,
    retained_events: bool,
    sorted_output: bool,
}

impl SummarySettings {
    /// Pre-sizes storage for the expected number of events
    ///
    /// Only has effect together with [`SummarySettings::with_retained_events`]
    pub fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    /// Keeps every added event in addition to running totals
    pub fn with_retained_events(self, retained_events: bool) -> Self {
        Self {
            retained_events,
            ..self
        }
    }

    /// Renders histogram ordered by status code and error set alphabetically
    ///
    /// By default both are rendered in hash order, which is unspecified and may change
    /// whenever the set of status codes or error messages changes.
    pub fn with_sorted_output(self, sorted_output: bool) -> Self {
        Self {
            sorted_output,
            ..self
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn retained_events(&self) -> bool {
        self.retained_events
    }

    pub fn sorted_output(&self) -> bool {
        self.sorted_output
    }
}
