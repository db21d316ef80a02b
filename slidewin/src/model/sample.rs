use std::fmt;

use serde::{Deserialize, Serialize};

use super::metric::{BaseMetric, MetricDescription, POINT_IN_TIME};
use super::time::TimeMeasure;
use crate::error::AnalysisError;

/// An immutable measurement: the point in time (normalized to seconds), its numerical value and
/// the metric it was taken for.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    point_in_time: f64,
    value: f64,
    metric: MetricDescription,
}

impl fmt::Debug for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sample")
            .field("point_in_time", &self.point_in_time)
            .field("value", &self.value)
            .field("metric", &self.metric.id())
            .finish()
    }
}

impl Sample {
    /// Creates a sample at the given point in time (already in seconds).
    pub const fn new(metric: MetricDescription, point_in_time: f64, value: f64) -> Self {
        Self { point_in_time, value, metric }
    }

    /// Creates a `(point in time, value)` tuple measurement, normalizing the point in time to
    /// seconds. Fails unless `metric` decomposes into a point in time and exactly one data metric.
    pub fn tuple(metric: MetricDescription, point_in_time: TimeMeasure, value: f64) -> Result<Self, AnalysisError> {
        if metric.data_metric().is_none() {
            return Err(AnalysisError::invalid_configuration(format!(
                "metric {metric} is not a (point in time, data) tuple"
            )));
        }

        Ok(Self::new(metric, point_in_time.as_secs_f64(), value))
    }

    pub const fn point_in_time(&self) -> f64 {
        self.point_in_time
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn metric(&self) -> &MetricDescription {
        &self.metric
    }

    pub fn point_in_time_as(&self, unit: super::TimeUnit) -> TimeMeasure {
        TimeMeasure::seconds(self.point_in_time).to(unit)
    }

    /// The component of this sample reported for `base`: the point in time for the point-in-time
    /// metric, the value for the data metric, `None` for metrics the sample does not carry.
    pub fn value_for(&self, base: &BaseMetric) -> Option<f64> {
        if base == &*POINT_IN_TIME && self.metric.subsumes(base) {
            Some(self.point_in_time)
        } else if self.metric.subsumes(base) {
            Some(self.value)
        } else {
            None
        }
    }
}
