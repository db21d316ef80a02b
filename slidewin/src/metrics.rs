use once_cell::sync::Lazy;
use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};

use crate::error::{AnalysisError, MetricLabel};
use crate::Result;

pub static WINDOW_FULL_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("window_full_events", "Number of times a sliding window was full and notified its observers"),
        &["window"],
    )
    .expect("failed creating window_full_events metric")
});

pub static WINDOW_DISCONTINUITIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "window_discontinuities",
            "Number of times a sliding window was flushed because a sample preceded its lower bound",
        ),
        &["window"],
    )
    .expect("failed creating window_discontinuities metric")
});

pub static AGGREGATED_VALUE: Lazy<GaugeVec> = Lazy::new(|| {
    GaugeVec::new(
        Opts::new("aggregated_value", "Most recent value derived by an aggregator"),
        &["aggregator"],
    )
    .expect("failed creating aggregated_value metric")
});

pub static DROPPED_SAMPLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("dropped_aggregated_samples", "Aggregated samples dropped because no sink was attached"),
        &["aggregator"],
    )
    .expect("failed creating dropped_aggregated_samples metric")
});

pub static ANALYSIS_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("analysis_errors", "Number of recoverable errors raised during analysis"),
        &["error_type"],
    )
    .expect("failed creating analysis_errors metric")
});

#[tracing::instrument(level = "trace")]
pub fn register_metrics(registry: &Registry) -> Result<()> {
    registry.register(Box::new(WINDOW_FULL_EVENTS.clone()))?;
    registry.register(Box::new(WINDOW_DISCONTINUITIES.clone()))?;
    registry.register(Box::new(AGGREGATED_VALUE.clone()))?;
    registry.register(Box::new(DROPPED_SAMPLES.clone()))?;
    registry.register(Box::new(ANALYSIS_ERRORS.clone()))?;
    Ok(())
}

pub fn track_error(error: &AnalysisError) {
    ANALYSIS_ERRORS.with_label_values(&[error.label().as_str()]).inc()
}

pub fn track_dropped_sample(aggregator: &str) {
    DROPPED_SAMPLES.with_label_values(&[aggregator]).inc()
}
