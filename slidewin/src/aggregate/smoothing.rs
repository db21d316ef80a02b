use validator::Validate;

use super::{UtilizationAggregator, WindowAggregation, WindowBounds};
use crate::error::AnalysisError;
use crate::model::{MetricDescription, Sample, TimeMeasure, UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE};
use crate::settings::SmoothingSettings;

/// Load average computed by a leaky integrator. The resource state is sampled every
/// `sampling_rate` seconds and folded into a running average that decays with time constant
/// `reporting_period`. The running average carries over from one window to the next.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothingAggregator {
    expected_metric: MetricDescription,
    sampling_rate: f64,
    smoothing_factor: f64,
    running_average: f64,
}

impl ExponentialSmoothingAggregator {
    pub fn new(
        expected_window_data_metric: &MetricDescription, sampling_rate: TimeMeasure, reporting_period: TimeMeasure,
    ) -> Result<Self, AnalysisError> {
        if !UtilizationAggregator::is_allowed_window_data_metric(expected_window_data_metric) {
            return Err(AnalysisError::invalid_configuration(format!(
                "load average cannot be computed from window data of metric {expected_window_data_metric}"
            )));
        }

        let sampling_rate = sampling_rate.check_positive("sampling rate")?;
        let reporting_period = reporting_period.check_positive("reporting period")?;

        Ok(Self {
            expected_metric: expected_window_data_metric.clone(),
            sampling_rate,
            smoothing_factor: smoothing_factor(sampling_rate, reporting_period),
            running_average: 0.0,
        })
    }

    pub fn from_settings(
        expected_window_data_metric: &MetricDescription, settings: &SmoothingSettings,
    ) -> Result<Self, AnalysisError> {
        settings.validate()?;
        Self::new(
            expected_window_data_metric,
            settings.sampling_rate,
            settings.reporting_period,
        )
    }

    /// Sampling rate in seconds.
    pub const fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    pub const fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    pub const fn current_load_average(&self) -> f64 {
        self.running_average
    }

    fn update(&mut self, state: f64) {
        self.running_average = self.running_average * (1.0 - self.smoothing_factor) + state * self.smoothing_factor;
    }
}

/// `1 - e^(-sampling_rate / reporting_period)`
fn smoothing_factor(sampling_rate: f64, reporting_period: f64) -> f64 {
    -(-sampling_rate / reporting_period).exp_m1()
}

impl WindowAggregation for ExponentialSmoothingAggregator {
    fn expected_window_data_metric(&self) -> &MetricDescription {
        &self.expected_metric
    }

    fn label(&self) -> String {
        "exponential_smoothing".into()
    }

    #[tracing::instrument(level = "trace", skip(self, window_data))]
    fn process_window_data(&mut self, window_data: &[Sample], bounds: WindowBounds) -> Sample {
        let mut sampling_point = bounds.lower_bound;
        let mut data = window_data.iter().peekable();

        while let Some(current) = data.next() {
            let state = current.value();
            while sampling_point < current.point_in_time() {
                sampling_point += self.sampling_rate;
            }

            match data.peek() {
                Some(next) => {
                    while sampling_point < next.point_in_time() {
                        self.update(state);
                        sampling_point += self.sampling_rate;
                    }
                },
                None if current.point_in_time() <= sampling_point => self.update(state),
                None => {},
            }
        }

        tracing::debug!(load_average=%self.running_average, "load average updated");
        Sample::new(
            UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE.clone(),
            bounds.upper_bound(),
            self.running_average,
        )
    }
}
