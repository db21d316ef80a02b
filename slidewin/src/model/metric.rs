use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Whether samples of a metric are independent observations or describe a step function that
/// holds its value until the next sample.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScopeOfValidity {
    Discrete,
    Continuous,
}

/// A single numerical metric. Identity is the `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseMetric {
    pub id: String,
    pub name: String,
    pub scope: ScopeOfValidity,
}

impl BaseMetric {
    pub fn new(id: impl Into<String>, name: impl Into<String>, scope: ScopeOfValidity) -> Self {
        Self { id: id.into(), name: name.into(), scope }
    }
}

impl PartialEq for BaseMetric {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BaseMetric {}

impl Hash for BaseMetric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A metric composed of other metrics; e.g., a `(point in time, state)` tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSet {
    pub id: String,
    pub name: String,
    pub subsumed: Vec<MetricDescription>,
}

/// Metric metadata attached to samples, windows and aggregators. Descriptions are equal when
/// their ids are equal; a metric set additionally subsumes each of its constituent metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricDescription {
    Base(BaseMetric),
    Set(MetricSet),
}

impl MetricDescription {
    /// Builds the `(point in time, data)` metric set used for tuple samples.
    pub fn tuple(id: impl Into<String>, name: impl Into<String>, data_metric: BaseMetric) -> Self {
        Self::Set(MetricSet {
            id: id.into(),
            name: name.into(),
            subsumed: vec![Self::Base(POINT_IN_TIME.clone()), Self::Base(data_metric)],
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Base(m) => m.id.as_str(),
            Self::Set(m) => m.id.as_str(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Base(m) => m.name.as_str(),
            Self::Set(m) => m.name.as_str(),
        }
    }

    pub const fn as_base(&self) -> Option<&BaseMetric> {
        match self {
            Self::Base(m) => Some(m),
            Self::Set(_) => None,
        }
    }

    pub fn subsumed_metrics(&self) -> &[Self] {
        match self {
            Self::Base(_) => &[],
            Self::Set(m) => m.subsumed.as_slice(),
        }
    }

    /// True if the description is the base metric or, recursively, contains it.
    pub fn subsumes(&self, base: &BaseMetric) -> bool {
        match self {
            Self::Base(m) => m == base,
            Self::Set(m) => m.subsumed.iter().any(|sub| sub.subsumes(base)),
        }
    }

    /// True if data described by this metric can be used where `required` is expected: the
    /// metrics are equal, or `required` is a base metric this description subsumes.
    pub fn satisfies(&self, required: &Self) -> bool {
        self == required || required.as_base().map_or(false, |base| self.subsumes(base))
    }

    /// For a `(point in time, data)` set, the data metric. `None` if the description does not
    /// decompose into exactly a point in time and one other base metric.
    pub fn data_metric(&self) -> Option<&BaseMetric> {
        match self.subsumed_metrics() {
            [Self::Base(first), Self::Base(second)] if first == &*POINT_IN_TIME && second != &*POINT_IN_TIME => {
                Some(second)
            },
            [Self::Base(first), Self::Base(second)] if second == &*POINT_IN_TIME && first != &*POINT_IN_TIME => {
                Some(first)
            },
            _ => None,
        }
    }
}

impl PartialEq for MetricDescription {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for MetricDescription {}

impl Hash for MetricDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for MetricDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name(), self.id())
    }
}

impl From<BaseMetric> for MetricDescription {
    fn from(metric: BaseMetric) -> Self {
        Self::Base(metric)
    }
}

pub static POINT_IN_TIME: Lazy<BaseMetric> =
    Lazy::new(|| BaseMetric::new("point_in_time", "Point in Time", ScopeOfValidity::Continuous));

pub static STATE_OF_ACTIVE_RESOURCE: Lazy<BaseMetric> = Lazy::new(|| {
    BaseMetric::new(
        "state_of_active_resource",
        "State of Active Resource",
        ScopeOfValidity::Continuous,
    )
});

pub static UTILIZATION_OF_ACTIVE_RESOURCE: Lazy<BaseMetric> = Lazy::new(|| {
    BaseMetric::new(
        "utilization_of_active_resource",
        "Utilization of Active Resource",
        ScopeOfValidity::Continuous,
    )
});

pub static RESPONSE_TIME: Lazy<BaseMetric> =
    Lazy::new(|| BaseMetric::new("response_time", "Response Time", ScopeOfValidity::Discrete));

pub static STATE_OF_ACTIVE_RESOURCE_TUPLE: Lazy<MetricDescription> = Lazy::new(|| {
    MetricDescription::tuple(
        "state_of_active_resource_tuple",
        "State of Active Resource Tuple",
        STATE_OF_ACTIVE_RESOURCE.clone(),
    )
});

pub static UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE: Lazy<MetricDescription> = Lazy::new(|| {
    MetricDescription::tuple(
        "utilization_of_active_resource_tuple",
        "Utilization of Active Resource Tuple",
        UTILIZATION_OF_ACTIVE_RESOURCE.clone(),
    )
});

pub static RESPONSE_TIME_TUPLE: Lazy<MetricDescription> =
    Lazy::new(|| MetricDescription::tuple("response_time_tuple", "Response Time Tuple", RESPONSE_TIME.clone()));
