use validator::Validate;

use crate::aggregate::{Aggregator, MemorySink, UtilizationAggregator};
use crate::error::AnalysisError;
use crate::model::{MetricDescription, Sample, STATE_OF_ACTIVE_RESOURCE_TUPLE, UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE};
use crate::settings::UtilizationFilterSettings;
use crate::window::{BatchSlidingWindow, RetentionStrategy, SlidingWindow};

pub const UTILIZATION_FILTER_WINDOW: &str = "utilization_filter";

/// Ordered samples recorded for a single metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    metric: MetricDescription,
    samples: Vec<Sample>,
}

impl SampleBatch {
    pub const fn new(metric: MetricDescription) -> Self {
        Self { metric, samples: Vec::new() }
    }

    /// Creates a batch from samples that must all be measured for `metric`.
    pub fn from_samples(metric: MetricDescription, samples: Vec<Sample>) -> Result<Self, AnalysisError> {
        let mut batch = Self::new(metric);
        for sample in samples {
            batch.push(sample)?;
        }
        Ok(batch)
    }

    pub fn push(&mut self, sample: Sample) -> Result<(), AnalysisError> {
        if sample.metric() != &self.metric {
            return Err(AnalysisError::invalid_measurement(format!(
                "sample of metric {} cannot be recorded in batch of {}",
                sample.metric(),
                self.metric
            )));
        }

        self.samples.push(sample);
        Ok(())
    }

    pub const fn metric(&self) -> &MetricDescription {
        &self.metric
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a SampleBatch {
    type IntoIter = std::slice::Iter<'a, Sample>;
    type Item = &'a Sample;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Derives utilization over recorded resource states after the fact, running the states through
/// a data-driven sliding window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilizationFilter {
    settings: UtilizationFilterSettings,
}

impl UtilizationFilter {
    pub fn new(settings: UtilizationFilterSettings) -> Result<Self, AnalysisError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub const fn settings(&self) -> &UtilizationFilterSettings {
        &self.settings
    }

    /// Utilization of each window over `states`, a batch of resource state samples. The trailing
    /// partial window is included.
    #[tracing::instrument(level = "trace", skip(self, states), fields(nr_states=%states.len()))]
    pub fn apply(&self, states: &SampleBatch) -> Result<SampleBatch, AnalysisError> {
        if states.metric() != &*STATE_OF_ACTIVE_RESOURCE_TUPLE {
            return Err(AnalysisError::invalid_configuration(format!(
                "utilization filter requires {} data but was given {}",
                *STATE_OF_ACTIVE_RESOURCE_TUPLE,
                states.metric()
            )));
        }

        let window = SlidingWindow::builder(STATE_OF_ACTIVE_RESOURCE_TUPLE.clone())
            .with_name(UTILIZATION_FILTER_WINDOW)
            .with_length(self.settings.window_length)
            .with_increment(self.settings.window_increment)
            .with_retention(RetentionStrategy::KeepLastPriorToLowerBound)
            .build()?;
        let mut window = BatchSlidingWindow::new(window);

        let sink = MemorySink::default();
        let utilization = UtilizationAggregator::new(&STATE_OF_ACTIVE_RESOURCE_TUPLE)?;
        window.add_observer(Aggregator::new(utilization).with_sink(sink.clone()))?;

        for state in states {
            window.add_measurement(state.clone())?;
        }
        window.no_more_data_available();

        let utilizations = SampleBatch {
            metric: UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE.clone(),
            samples: sink.take(),
        };
        tracing::debug!(nr_utilizations=%utilizations.len(), "utilization filter applied");
        Ok(utilizations)
    }
}
