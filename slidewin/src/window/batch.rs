use std::ops::Deref;

use super::SlidingWindow;
use crate::aggregate::Aggregator;
use crate::error::AnalysisError;
use crate::model::Sample;

/// Sliding window driven by the data itself, for post-hoc analysis of recorded measurements. A
/// sample beyond the current upper bound closes the window (repeatedly, across gaps) before the
/// sample is buffered.
#[derive(Debug)]
pub struct BatchSlidingWindow {
    inner: SlidingWindow,
}

impl BatchSlidingWindow {
    pub const fn new(window: SlidingWindow) -> Self {
        Self { inner: window }
    }

    pub fn add_observer(&mut self, observer: Aggregator) -> Result<(), AnalysisError> {
        self.inner.add_observer(observer)
    }

    #[tracing::instrument(level = "trace", skip(self), fields(window=%self.inner.name()))]
    pub fn add_measurement(&mut self, sample: Sample) -> Result<(), AnalysisError> {
        self.inner.check_measurement(&sample)?;

        while self.inner.current_upper_bound() < sample.point_in_time() {
            self.inner.on_window_full();
        }

        self.inner.add_measurement(sample)
    }

    pub fn no_more_data_available(&mut self) {
        self.inner.no_more_data_available();
    }

    pub fn into_inner(self) -> SlidingWindow {
        self.inner
    }
}

impl Deref for BatchSlidingWindow {
    type Target = SlidingWindow;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
