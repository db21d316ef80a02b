use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::{integrate, WindowAggregation, WindowBounds};
use crate::error::AnalysisError;
use crate::math;
use crate::model::{BaseMetric, MetricDescription, Sample, ScopeOfValidity};

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatisticalCharacteristic {
    ArithmeticMean,
    GeometricMean,
    HarmonicMean,
    Median,
}

impl StatisticalCharacteristic {
    /// Characterizes the values as independent observations.
    pub fn discrete(&self, values: &[f64]) -> f64 {
        let result = match self {
            Self::ArithmeticMean => math::mean(values.iter().copied()),
            Self::GeometricMean => {
                let mean_of_logs = math::mean(values.iter().map(|v| v.ln()));
                if mean_of_logs == 0.0 {
                    0.0
                } else {
                    mean_of_logs.exp()
                }
            },
            Self::HarmonicMean => {
                let sum_of_inverses: f64 = values.iter().map(|v| v.recip()).sum();
                if values.is_empty() || sum_of_inverses == 0.0 || !sum_of_inverses.is_finite() {
                    0.0
                } else {
                    values.len() as f64 / sum_of_inverses
                }
            },
            Self::Median => math::median(values.iter().copied()),
        };

        self.resolve_degenerate(result)
    }

    fn resolve_degenerate(&self, result: f64) -> f64 {
        if !result.is_finite() {
            tracing::warn!(characteristic=%self, %result, "non-finite statistic resolved to zero");
        }
        math::finite_or_zero(result)
    }

    /// Characterizes the window data as a step function, weighting each value by how long it
    /// holds within the window. Median has no time-weighted form and treats values as discrete.
    pub fn continuous(&self, window_data: &[Sample], bounds: WindowBounds) -> f64 {
        if window_data.is_empty() {
            return 0.0;
        }

        let length = bounds.length;
        let result = match self {
            Self::ArithmeticMean => integrate(window_data, bounds, |v| v) / length,
            Self::GeometricMean => (integrate(window_data, bounds, f64::ln) / length).exp(),
            Self::HarmonicMean => {
                let weighted_inverses = integrate(window_data, bounds, f64::recip);
                if weighted_inverses == 0.0 || !weighted_inverses.is_finite() {
                    0.0
                } else {
                    length / weighted_inverses
                }
            },
            Self::Median => {
                let values: Vec<f64> = window_data.iter().map(Sample::value).collect();
                self.discrete(&values)
            },
        };

        self.resolve_degenerate(result)
    }
}

/// Statistical characterization of a window's data metric. Whether samples are treated as
/// discrete observations or as a step function follows the data metric's scope of validity.
#[derive(Debug, Clone)]
pub struct StatisticalCharacterizationAggregator {
    characteristic: StatisticalCharacteristic,
    expected_metric: MetricDescription,
    data_metric: BaseMetric,
}

impl StatisticalCharacterizationAggregator {
    /// The expected window data metric must be a metric set of a point in time and exactly one
    /// data metric.
    pub fn new(
        characteristic: StatisticalCharacteristic, expected_window_data_metric: &MetricDescription,
    ) -> Result<Self, AnalysisError> {
        let data_metric = expected_window_data_metric.data_metric().cloned().ok_or_else(|| {
            AnalysisError::invalid_configuration(format!(
                "{characteristic} requires a (point in time, data) metric set but was given {expected_window_data_metric}"
            ))
        })?;

        Ok(Self {
            characteristic,
            expected_metric: expected_window_data_metric.clone(),
            data_metric,
        })
    }

    pub const fn characteristic(&self) -> StatisticalCharacteristic {
        self.characteristic
    }

    pub const fn data_metric(&self) -> &BaseMetric {
        &self.data_metric
    }

    pub const fn scope_of_validity(&self) -> ScopeOfValidity {
        self.data_metric.scope
    }

    pub fn characterize(&self, window_data: &[Sample], bounds: WindowBounds) -> f64 {
        match self.scope_of_validity() {
            ScopeOfValidity::Discrete => {
                let values: Vec<f64> = window_data.iter().map(Sample::value).collect();
                self.characteristic.discrete(&values)
            },
            ScopeOfValidity::Continuous => self.characteristic.continuous(window_data, bounds),
        }
    }
}

impl WindowAggregation for StatisticalCharacterizationAggregator {
    fn expected_window_data_metric(&self) -> &MetricDescription {
        &self.expected_metric
    }

    fn label(&self) -> String {
        format!("{}_{}", self.scope_of_validity(), self.characteristic)
    }

    #[tracing::instrument(level = "trace", skip(self, window_data), fields(characteristic=%self.characteristic))]
    fn process_window_data(&mut self, window_data: &[Sample], bounds: WindowBounds) -> Sample {
        let value = self.characterize(window_data, bounds);
        Sample::new(self.expected_metric.clone(), bounds.upper_bound(), value)
    }
}
