use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_positive_measure;
use crate::model::TimeMeasure;

/// Parameters of the exponentially smoothed load average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SmoothingSettings {
    #[validate(custom = "validate_positive_measure")]
    pub sampling_rate: TimeMeasure,

    #[validate(custom = "validate_positive_measure")]
    pub reporting_period: TimeMeasure,
}
