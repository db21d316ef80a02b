use std::collections::VecDeque;
use std::fmt;

use validator::Validate;

use super::RetentionStrategy;
use crate::aggregate::Aggregator;
use crate::error::AnalysisError;
use crate::metrics::{self, WINDOW_DISCONTINUITIES, WINDOW_FULL_EVENTS};
use crate::model::{MetricDescription, Sample, TimeMeasure};
use crate::settings::WindowSettings;

pub const DEFAULT_WINDOW_NAME: &str = "sliding_window";

/// Buffer of samples spanning `[lower_bound, lower_bound + length)`. When the window is full, every
/// attached observer is handed the buffered samples and the window moves on by `increment`,
/// applying its retention strategy to the buffer.
pub struct SlidingWindow {
    name: String,
    length: f64,
    increment: f64,
    lower_bound: f64,
    accepted_metric: MetricDescription,
    retention: RetentionStrategy,
    data: VecDeque<Sample>,
    observers: Vec<Aggregator>,
}

impl fmt::Debug for SlidingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlidingWindow")
            .field("name", &self.name)
            .field("lower_bound", &self.lower_bound)
            .field("upper_bound", &self.current_upper_bound())
            .field("increment", &self.increment)
            .field("accepted_metric", &self.accepted_metric.id())
            .field("retention", &self.retention)
            .field("window_size", &self.data.len())
            .field("nr_observers", &self.observers.len())
            .finish()
    }
}

impl SlidingWindow {
    pub fn builder(accepted_metric: MetricDescription) -> SlidingWindowBuilder {
        SlidingWindowBuilder::new(accepted_metric)
    }

    pub fn from_settings(
        name: impl Into<String>, settings: &WindowSettings, accepted_metric: MetricDescription,
    ) -> Result<Self, AnalysisError> {
        settings.validate()?;

        let builder = Self::builder(accepted_metric)
            .with_name(name)
            .with_length(settings.window_length)
            .with_initial_lower_bound(settings.initial_lower_bound)
            .with_retention(settings.retention);

        let builder = match settings.window_increment {
            Some(increment) => builder.with_increment(increment),
            None => builder,
        };

        builder.build()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Length reported to observers when the window closes.
    pub const fn effective_length(&self) -> f64 {
        self.length
    }

    pub const fn increment(&self) -> f64 {
        self.increment
    }

    pub const fn retention(&self) -> RetentionStrategy {
        self.retention
    }

    pub const fn accepted_metric(&self) -> &MetricDescription {
        &self.accepted_metric
    }

    pub const fn current_lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn current_upper_bound(&self) -> f64 {
        self.lower_bound + self.effective_length()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.data.iter()
    }

    /// Drops all buffered samples without notifying observers.
    pub fn flush(&mut self) {
        self.data.clear();
    }

    pub fn attached_observers(&self) -> &[Aggregator] {
        self.observers.as_slice()
    }

    pub fn attached_observers_mut(&mut self) -> &mut [Aggregator] {
        self.observers.as_mut_slice()
    }

    /// Attaches an observer notified each time the window is full. The observer must expect
    /// exactly the metric this window accepts.
    pub fn add_observer(&mut self, observer: Aggregator) -> Result<(), AnalysisError> {
        if observer.expected_window_data_metric() != &self.accepted_metric {
            let err = AnalysisError::IncompatibleListener {
                accepted: self.accepted_metric.to_string(),
                given: observer.expected_window_data_metric().to_string(),
            };
            metrics::track_error(&err);
            return Err(err);
        }

        tracing::debug!(window=%self.name, observer=%observer.label(), "observer attached to window");
        self.observers.push(observer);
        Ok(())
    }

    /// Rejects samples whose point in time is not finite or whose metric neither equals nor
    /// subsumes the accepted metric.
    pub(super) fn check_measurement(&self, sample: &Sample) -> Result<(), AnalysisError> {
        let result = if !sample.point_in_time().is_finite() {
            Err(AnalysisError::invalid_measurement(format!(
                "point in time must be finite but was {}",
                sample.point_in_time()
            )))
        } else if !sample.metric().satisfies(&self.accepted_metric) {
            Err(AnalysisError::invalid_measurement(format!(
                "measurement metric {} does not adhere to or subsume window metric {}",
                sample.metric(),
                self.accepted_metric
            )))
        } else {
            Ok(())
        };

        if let Err(ref err) = result {
            tracing::warn!(error=?err, window=%self.name, "measurement rejected by window");
            metrics::track_error(err);
        }

        result
    }

    /// Appends the sample to the window. A sample prior to the current lower bound marks a
    /// discontinuity; e.g., the simulation was reset. The buffer is flushed before appending it.
    #[tracing::instrument(level = "trace", skip(self), fields(window=%self.name))]
    pub fn add_measurement(&mut self, sample: Sample) -> Result<(), AnalysisError> {
        self.check_measurement(&sample)?;

        if sample.point_in_time() < self.lower_bound {
            tracing::debug!(
                point_in_time=%sample.point_in_time(), lower_bound=%self.lower_bound, discarded=%self.data.len(),
                "discontinuity in window data - flushing window"
            );
            WINDOW_DISCONTINUITIES.with_label_values(&[self.name.as_str()]).inc();
            self.data.clear();
        }

        self.data.push_back(sample);
        Ok(())
    }

    /// Notifies every observer, in attachment order, with the buffered samples and the current
    /// bounds, then moves the window on.
    #[tracing::instrument(level = "trace", skip(self), fields(window=%self.name))]
    pub fn on_window_full(&mut self) {
        let lower_bound = self.lower_bound;
        let length = self.effective_length();
        tracing::debug!(
            %lower_bound, %length, window_size=%self.data.len(), nr_observers=%self.observers.len(),
            "window is full - notifying observers"
        );
        WINDOW_FULL_EVENTS.with_label_values(&[self.name.as_str()]).inc();

        let snapshot: &[Sample] = self.data.make_contiguous();
        for observer in self.observers.iter_mut() {
            observer.on_sliding_window_full(snapshot, lower_bound, length);
        }

        self.move_on();
    }

    /// Signals that no further samples will arrive so the observers see the final window.
    pub fn no_more_data_available(&mut self) {
        self.on_window_full();
    }

    fn move_on(&mut self) {
        self.lower_bound += self.increment;
        self.retention.adjust(&mut self.data, self.lower_bound, self.increment);
        tracing::trace!(
            lower_bound=%self.lower_bound, retained=%self.data.len(), retention=%self.retention,
            "window moved on"
        );
    }
}

#[derive(Debug, Clone)]
pub struct SlidingWindowBuilder {
    name: String,
    accepted_metric: MetricDescription,
    length: Option<TimeMeasure>,
    increment: Option<TimeMeasure>,
    initial_lower_bound: TimeMeasure,
    retention: RetentionStrategy,
}

impl SlidingWindowBuilder {
    fn new(accepted_metric: MetricDescription) -> Self {
        Self {
            name: DEFAULT_WINDOW_NAME.to_string(),
            accepted_metric,
            length: None,
            increment: None,
            initial_lower_bound: TimeMeasure::ZERO,
            retention: RetentionStrategy::default(),
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self }
    }

    pub fn with_length(self, length: TimeMeasure) -> Self {
        Self { length: Some(length), ..self }
    }

    /// Defaults to the window length; i.e., tumbling windows.
    pub fn with_increment(self, increment: TimeMeasure) -> Self {
        Self { increment: Some(increment), ..self }
    }

    pub fn with_initial_lower_bound(self, lower_bound: TimeMeasure) -> Self {
        Self { initial_lower_bound: lower_bound, ..self }
    }

    pub fn with_retention(self, retention: RetentionStrategy) -> Self {
        Self { retention, ..self }
    }

    pub fn build(self) -> Result<SlidingWindow, AnalysisError> {
        let length = self
            .length
            .ok_or_else(|| AnalysisError::invalid_configuration("window length is required"))?
            .check_positive("window length")?;

        let increment = match self.increment {
            Some(increment) => increment.check_positive("window increment")?,
            None => length,
        };

        let lower_bound = self.initial_lower_bound.check_non_negative("window lower bound")?;

        Ok(SlidingWindow {
            name: self.name,
            length,
            increment,
            lower_bound,
            accepted_metric: self.accepted_metric,
            retention: self.retention,
            data: VecDeque::new(),
            observers: Vec::new(),
        })
    }
}
