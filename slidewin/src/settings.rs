use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AnalysisError;
use crate::model::TimeMeasure;

mod filter_settings;
mod smoothing_settings;
mod window_settings;

pub use filter_settings::UtilizationFilterSettings;
pub use smoothing_settings::SmoothingSettings;
pub use window_settings::{default_window_length, WindowSettings, DEFAULT_WINDOW_LENGTH};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate]
    pub window: WindowSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub smoothing: Option<SmoothingSettings>,

    #[serde(default)]
    #[validate]
    pub utilization_filter: UtilizationFilterSettings,
}

impl Settings {
    /// Loads and validates settings from a single configuration source.
    #[tracing::instrument(level = "trace", skip(source))]
    pub fn from_source<S>(source: S) -> Result<Self, AnalysisError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder().add_source(source).build()?;
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(?settings, "analysis settings loaded");
        Ok(settings)
    }
}

pub(crate) fn validate_positive_measure(measure: &TimeMeasure) -> Result<(), ValidationError> {
    let seconds = measure.as_secs_f64();
    if seconds.is_finite() && 0.0 < seconds {
        Ok(())
    } else {
        Err(ValidationError::new("time measure must be positive and finite"))
    }
}

pub(crate) fn validate_non_negative_measure(measure: &TimeMeasure) -> Result<(), ValidationError> {
    let seconds = measure.as_secs_f64();
    if seconds.is_finite() && 0.0 <= seconds {
        Ok(())
    } else {
        Err(ValidationError::new("time measure must be non-negative and finite"))
    }
}
