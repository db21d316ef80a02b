use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_non_negative_measure, validate_positive_measure};
use crate::model::TimeMeasure;
use crate::window::RetentionStrategy;

pub const DEFAULT_WINDOW_LENGTH: TimeMeasure = TimeMeasure::seconds(10.0);

pub const fn default_window_length() -> TimeMeasure {
    DEFAULT_WINDOW_LENGTH
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WindowSettings {
    #[validate(custom = "validate_positive_measure")]
    #[serde(default = "default_window_length")]
    pub window_length: TimeMeasure,

    /// Defaults to the window length.
    #[validate(custom = "validate_positive_measure")]
    pub window_increment: Option<TimeMeasure>,

    #[validate(custom = "validate_non_negative_measure")]
    #[serde(default)]
    pub initial_lower_bound: TimeMeasure,

    #[serde(default)]
    pub retention: RetentionStrategy,
}

impl WindowSettings {
    pub fn effective_increment(&self) -> TimeMeasure {
        self.window_increment.unwrap_or(self.window_length)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            window_increment: None,
            initial_lower_bound: TimeMeasure::ZERO,
            retention: RetentionStrategy::default(),
        }
    }
}
