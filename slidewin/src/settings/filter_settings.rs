use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_positive_measure;
use super::window_settings::DEFAULT_WINDOW_LENGTH;
use crate::model::TimeMeasure;

/// Window geometry of the post-hoc utilization filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UtilizationFilterSettings {
    #[validate(custom = "validate_positive_measure")]
    pub window_length: TimeMeasure,

    #[validate(custom = "validate_positive_measure")]
    pub window_increment: TimeMeasure,
}

impl Default for UtilizationFilterSettings {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            window_increment: DEFAULT_WINDOW_LENGTH,
        }
    }
}
