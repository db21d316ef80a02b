use super::{integrate, WindowAggregation, WindowBounds};
use crate::error::AnalysisError;
use crate::model::{MetricDescription, Sample, STATE_OF_ACTIVE_RESOURCE_TUPLE, UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE};

/// Fraction of the window during which the observed resource is busy. Any state of at least one
/// counts as fully busy.
#[derive(Debug, Clone)]
pub struct UtilizationAggregator {
    expected_metric: MetricDescription,
}

impl UtilizationAggregator {
    /// Window data metrics a utilization can be computed from: resource states or previously
    /// derived utilizations.
    pub fn allowed_window_data_metrics() -> [&'static MetricDescription; 2] {
        [&*STATE_OF_ACTIVE_RESOURCE_TUPLE, &*UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE]
    }

    pub fn is_allowed_window_data_metric(metric: &MetricDescription) -> bool {
        Self::allowed_window_data_metrics().contains(&metric)
    }

    pub fn new(expected_window_data_metric: &MetricDescription) -> Result<Self, AnalysisError> {
        if !Self::is_allowed_window_data_metric(expected_window_data_metric) {
            return Err(AnalysisError::invalid_configuration(format!(
                "utilization cannot be computed from window data of metric {expected_window_data_metric}"
            )));
        }

        Ok(Self { expected_metric: expected_window_data_metric.clone() })
    }

    /// Busy time over the window, relative to the window length.
    pub fn utilization(window_data: &[Sample], bounds: WindowBounds) -> f64 {
        let busy_time = integrate(window_data, bounds, |state| state.min(1.0));
        busy_time / bounds.length
    }
}

impl WindowAggregation for UtilizationAggregator {
    fn expected_window_data_metric(&self) -> &MetricDescription {
        &self.expected_metric
    }

    fn label(&self) -> String {
        "utilization".into()
    }

    #[tracing::instrument(level = "trace", skip(self, window_data))]
    fn process_window_data(&mut self, window_data: &[Sample], bounds: WindowBounds) -> Sample {
        let utilization = Self::utilization(window_data, bounds);
        Sample::new(
            UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE.clone(),
            bounds.upper_bound(),
            utilization,
        )
    }
}
