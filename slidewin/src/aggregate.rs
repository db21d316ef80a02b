use std::fmt;

use crate::error::AnalysisError;
use crate::metrics::{self, AGGREGATED_VALUE};
use crate::model::{MetricDescription, Sample};

mod integration;
mod sink;
mod smoothing;
mod statistics;
mod utilization;

pub use integration::{integrate, steps, Step, WindowBounds};
pub use sink::{MemorySink, Sink};
pub use smoothing::ExponentialSmoothingAggregator;
pub use statistics::{StatisticalCharacteristic, StatisticalCharacterizationAggregator};
pub use utilization::UtilizationAggregator;

/// Computes one derived sample from the data of a closed window.
pub trait WindowAggregation: fmt::Debug {
    /// The metric a window must accept for this aggregation to observe it.
    fn expected_window_data_metric(&self) -> &MetricDescription;

    fn label(&self) -> String;

    fn process_window_data(&mut self, window_data: &[Sample], bounds: WindowBounds) -> Sample;
}

#[derive(Debug, Clone)]
pub enum AggregatorKind {
    Utilization(UtilizationAggregator),
    ExponentialSmoothing(ExponentialSmoothingAggregator),
    StatisticalCharacterization(StatisticalCharacterizationAggregator),
}

impl AggregatorKind {
    fn as_aggregation(&self) -> &dyn WindowAggregation {
        match self {
            Self::Utilization(a) => a,
            Self::ExponentialSmoothing(a) => a,
            Self::StatisticalCharacterization(a) => a,
        }
    }

    fn as_aggregation_mut(&mut self) -> &mut dyn WindowAggregation {
        match self {
            Self::Utilization(a) => a,
            Self::ExponentialSmoothing(a) => a,
            Self::StatisticalCharacterization(a) => a,
        }
    }
}

impl WindowAggregation for AggregatorKind {
    fn expected_window_data_metric(&self) -> &MetricDescription {
        self.as_aggregation().expected_window_data_metric()
    }

    fn label(&self) -> String {
        self.as_aggregation().label()
    }

    fn process_window_data(&mut self, window_data: &[Sample], bounds: WindowBounds) -> Sample {
        self.as_aggregation_mut().process_window_data(window_data, bounds)
    }
}

impl From<UtilizationAggregator> for AggregatorKind {
    fn from(aggregator: UtilizationAggregator) -> Self {
        Self::Utilization(aggregator)
    }
}

impl From<ExponentialSmoothingAggregator> for AggregatorKind {
    fn from(aggregator: ExponentialSmoothingAggregator) -> Self {
        Self::ExponentialSmoothing(aggregator)
    }
}

impl From<StatisticalCharacterizationAggregator> for AggregatorKind {
    fn from(aggregator: StatisticalCharacterizationAggregator) -> Self {
        Self::StatisticalCharacterization(aggregator)
    }
}

/// Window observer: runs its aggregation whenever the observed window is full and records the
/// derived sample to every attached sink.
pub struct Aggregator {
    kind: AggregatorKind,
    sinks: Vec<Box<dyn Sink>>,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("kind", &self.kind)
            .field("nr_sinks", &self.sinks.len())
            .finish()
    }
}

impl Aggregator {
    pub fn new(kind: impl Into<AggregatorKind>) -> Self {
        Self { kind: kind.into(), sinks: Vec::new() }
    }

    /// Creates an aggregator recording to each of the sinks, which must not be empty.
    pub fn with_sinks(kind: impl Into<AggregatorKind>, sinks: Vec<Box<dyn Sink>>) -> Result<Self, AnalysisError> {
        if sinks.is_empty() {
            return Err(AnalysisError::invalid_configuration(
                "aggregator requires at least one sink",
            ));
        }

        Ok(Self { kind: kind.into(), sinks })
    }

    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn add_sink(&mut self, sink: impl Sink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn nr_sinks(&self) -> usize {
        self.sinks.len()
    }

    pub const fn kind(&self) -> &AggregatorKind {
        &self.kind
    }

    pub fn label(&self) -> String {
        self.kind.label()
    }

    pub fn expected_window_data_metric(&self) -> &MetricDescription {
        self.kind.expected_window_data_metric()
    }

    #[tracing::instrument(level = "trace", skip(self, window_data), fields(aggregator=%self.label(), window_size=%window_data.len()))]
    pub fn on_sliding_window_full(&mut self, window_data: &[Sample], lower_bound: f64, length: f64) {
        let bounds = WindowBounds::new(lower_bound, length);
        let result = self.kind.process_window_data(window_data, bounds);

        let label = self.label();
        tracing::debug!(
            aggregator=%label, point_in_time=%result.point_in_time(), value=%result.value(), nr_sinks=%self.sinks.len(),
            "window data aggregated"
        );
        AGGREGATED_VALUE.with_label_values(&[label.as_str()]).set(result.value());

        if self.sinks.is_empty() {
            tracing::warn!(aggregator=%label, "no sinks attached - aggregated sample dropped");
            metrics::track_dropped_sample(&label);
        }

        for sink in self.sinks.iter_mut() {
            sink.write(result.clone());
        }
    }
}
