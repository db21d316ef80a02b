use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::AnalysisError;

#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Centiseconds,
    Deciseconds,
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Converts a scalar in this unit into seconds. Sub-second units divide so that whole counts
    /// (e.g., 3000 ms) land exactly on whole seconds.
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            Self::Nanoseconds => value / 1_000_000_000.0,
            Self::Microseconds => value / 1_000_000.0,
            Self::Milliseconds => value / 1_000.0,
            Self::Centiseconds => value / 100.0,
            Self::Deciseconds => value / 10.0,
            Self::Seconds => value,
            Self::Minutes => value * 60.0,
            Self::Hours => value * 3_600.0,
            Self::Days => value * 86_400.0,
        }
    }

    pub fn in_unit(self, seconds: f64) -> f64 {
        match self {
            Self::Nanoseconds => seconds * 1_000_000_000.0,
            Self::Microseconds => seconds * 1_000_000.0,
            Self::Milliseconds => seconds * 1_000.0,
            Self::Centiseconds => seconds * 100.0,
            Self::Deciseconds => seconds * 10.0,
            Self::Seconds => seconds,
            Self::Minutes => seconds / 60.0,
            Self::Hours => seconds / 3_600.0,
            Self::Days => seconds / 86_400.0,
        }
    }
}

/// A duration or point in time expressed as a scalar and a unit. Samples and windows normalize
/// these into seconds when they are ingested.
#[serde_as]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMeasure {
    pub value: f64,
    #[serde(default)]
    #[serde_as(as = "DisplayFromStr")]
    pub unit: TimeUnit,
}

impl TimeMeasure {
    pub const ZERO: Self = Self::seconds(0.0);

    pub const fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub const fn seconds(value: f64) -> Self {
        Self::new(value, TimeUnit::Seconds)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.unit.to_seconds(self.value)
    }

    /// Re-expresses the measure in another unit.
    pub fn to(&self, unit: TimeUnit) -> Self {
        Self::new(unit.in_unit(self.as_secs_f64()), unit)
    }

    /// Seconds value of a measure that must be strictly positive and finite.
    pub fn check_positive(&self, label: &str) -> Result<f64, AnalysisError> {
        let seconds = self.as_secs_f64();
        if seconds.is_finite() && 0.0 < seconds {
            Ok(seconds)
        } else {
            Err(AnalysisError::invalid_configuration(format!(
                "{label} must be positive and finite, but was {self}"
            )))
        }
    }

    /// Seconds value of a measure that must be finite and not negative.
    pub fn check_non_negative(&self, label: &str) -> Result<f64, AnalysisError> {
        let seconds = self.as_secs_f64();
        if seconds.is_finite() && 0.0 <= seconds {
            Ok(seconds)
        } else {
            Err(AnalysisError::invalid_configuration(format!(
                "{label} must be non-negative and finite, but was {self}"
            )))
        }
    }
}

impl Default for TimeMeasure {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for TimeMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl From<Duration> for TimeMeasure {
    fn from(duration: Duration) -> Self {
        Self::seconds(duration.as_secs_f64())
    }
}

#[cfg(test)]
pub fn arb_time_unit() -> impl proptest::strategy::Strategy<Value = TimeUnit> {
    use proptest::prelude::*;
    prop_oneof![
        Just(TimeUnit::Nanoseconds),
        Just(TimeUnit::Microseconds),
        Just(TimeUnit::Milliseconds),
        Just(TimeUnit::Centiseconds),
        Just(TimeUnit::Deciseconds),
        Just(TimeUnit::Seconds),
        Just(TimeUnit::Minutes),
        Just(TimeUnit::Hours),
        Just(TimeUnit::Days),
    ]
}
