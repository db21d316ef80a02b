mod metric;
mod sample;
mod time;

pub use metric::{
    BaseMetric, MetricDescription, MetricSet, ScopeOfValidity, POINT_IN_TIME, RESPONSE_TIME, RESPONSE_TIME_TUPLE,
    STATE_OF_ACTIVE_RESOURCE, STATE_OF_ACTIVE_RESOURCE_TUPLE, UTILIZATION_OF_ACTIVE_RESOURCE,
    UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE,
};
pub use sample::Sample;
pub use time::{TimeMeasure, TimeUnit};

