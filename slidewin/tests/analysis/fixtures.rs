use claims::assert_ok;
use slidewin::aggregate::{Aggregator, AggregatorKind, MemorySink};
use slidewin::model::{MetricDescription, Sample, TimeMeasure, RESPONSE_TIME_TUPLE, STATE_OF_ACTIVE_RESOURCE_TUPLE};
use slidewin::window::{RetentionStrategy, SlidingWindow};

pub const DELTA: f64 = 1e-12;

pub fn state(point_in_time: TimeMeasure, value: f64) -> Sample {
    assert_ok!(Sample::tuple(STATE_OF_ACTIVE_RESOURCE_TUPLE.clone(), point_in_time, value))
}

pub fn response_time(point_in_time: f64, value: f64) -> Sample {
    assert_ok!(Sample::tuple(
        RESPONSE_TIME_TUPLE.clone(),
        TimeMeasure::seconds(point_in_time),
        value
    ))
}

pub fn make_window(
    name: &str, metric: &MetricDescription, length: TimeMeasure, increment: Option<TimeMeasure>,
    retention: RetentionStrategy,
) -> SlidingWindow {
    let builder = SlidingWindow::builder(metric.clone())
        .with_name(name)
        .with_length(length)
        .with_retention(retention);

    let builder = match increment {
        Some(increment) => builder.with_increment(increment),
        None => builder,
    };

    assert_ok!(builder.build())
}

/// Attaches an aggregator recording into a fresh sink, which is returned for inspection.
pub fn observe(window: &mut SlidingWindow, kind: impl Into<AggregatorKind>) -> MemorySink {
    let sink = MemorySink::default();
    assert_ok!(window.add_observer(Aggregator::new(kind).with_sink(sink.clone())));
    sink
}

pub fn values_of(sink: &MemorySink) -> Vec<(f64, f64)> {
    sink.samples().iter().map(|s| (s.point_in_time(), s.value())).collect()
}
