use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::model::Sample;

/// Policy applied to the buffered samples when a window moves on to its next lower bound.
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RetentionStrategy {
    /// Drop all buffered samples.
    FlushAll,

    /// Drop every sample strictly prior to the new lower bound.
    DiscardPriorToLowerBound,

    /// Drop samples strictly prior to the new lower bound except the latest of them, which still
    /// defines the state at the start of the new window.
    #[default]
    KeepLastPriorToLowerBound,
}

impl RetentionStrategy {
    #[tracing::instrument(level = "trace", skip(data))]
    pub fn adjust(&self, data: &mut VecDeque<Sample>, new_lower_bound: f64, _increment: f64) {
        match self {
            Self::FlushAll => data.clear(),
            Self::DiscardPriorToLowerBound => {
                discard_prior_to(data, new_lower_bound);
            },
            Self::KeepLastPriorToLowerBound => {
                if let Some(last_prior) = discard_prior_to(data, new_lower_bound) {
                    data.push_front(last_prior);
                }
            },
        }
    }
}

/// Pops samples from the front while they lie strictly before `lower_bound`, returning the last
/// sample removed.
fn discard_prior_to(data: &mut VecDeque<Sample>, lower_bound: f64) -> Option<Sample> {
    let mut last_removed = None;
    while data.front().map_or(false, |s| s.point_in_time() < lower_bound) {
        last_removed = data.pop_front();
    }
    last_removed
}
