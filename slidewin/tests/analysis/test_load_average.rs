use approx::assert_relative_eq;
use claims::assert_ok;
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use slidewin::aggregate::{Aggregator, ExponentialSmoothingAggregator, UtilizationAggregator};
use slidewin::model::{TimeMeasure, TimeUnit, STATE_OF_ACTIVE_RESOURCE_TUPLE, UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE};
use slidewin::settings::SmoothingSettings;
use slidewin::window::{BatchSlidingWindow, RetentionStrategy};

use crate::fixtures::*;

#[test]
fn test_load_average_and_utilization_share_a_window() {
    Lazy::force(&slidewin::tracing::TEST_TRACING);
    let main_span = tracing::info_span!("test_load_average_and_utilization_share_a_window");
    let _main_span_guard = main_span.enter();

    let mut window = make_window(
        "cpu",
        &STATE_OF_ACTIVE_RESOURCE_TUPLE,
        TimeMeasure::new(0.5, TimeUnit::Minutes),
        None,
        RetentionStrategy::KeepLastPriorToLowerBound,
    );

    let settings = SmoothingSettings {
        sampling_rate: TimeMeasure::new(5_000.0, TimeUnit::Milliseconds),
        reporting_period: TimeMeasure::seconds(30.0),
    };
    let smoothing = assert_ok!(ExponentialSmoothingAggregator::from_settings(
        &STATE_OF_ACTIVE_RESOURCE_TUPLE,
        &settings
    ));
    let alpha = smoothing.smoothing_factor();
    let load = observe(&mut window, smoothing);
    let utilization = observe(
        &mut window,
        assert_ok!(UtilizationAggregator::new(&STATE_OF_ACTIVE_RESOURCE_TUPLE)),
    );
    assert_eq!(window.attached_observers().len(), 2);

    for i in (0..30).step_by(5) {
        let busy = if i % 2 == 0 { 42.0 } else { 0.0 };
        assert_ok!(window.add_measurement(state(TimeMeasure::seconds(f64::from(i) + 0.5), busy)));
    }
    window.no_more_data_available();

    let mut expected = alpha * 42.0;
    expected *= 1.0 - alpha;
    expected = expected * (1.0 - alpha) + alpha * 42.0;
    expected *= 1.0 - alpha;
    expected = expected * (1.0 - alpha) + alpha * 42.0;
    expected *= 1.0 - alpha;

    let load = load.samples();
    assert_eq!(load.len(), 1);
    assert_eq!(load[0].metric(), &*UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE);
    assert_eq!(load[0].point_in_time(), 30.0);
    assert_relative_eq!(load[0].value(), expected, epsilon = DELTA);

    let utilization = values_of(&utilization);
    assert_eq!(utilization.len(), 1);
    assert_relative_eq!(utilization[0].1, 15.0 / 30.0, epsilon = DELTA);
}

#[test]
fn test_load_average_holds_across_empty_windows() {
    let mut window = BatchSlidingWindow::new(make_window(
        "cpu",
        &STATE_OF_ACTIVE_RESOURCE_TUPLE,
        TimeMeasure::seconds(10.0),
        None,
        RetentionStrategy::DiscardPriorToLowerBound,
    ));

    let smoothing = assert_ok!(ExponentialSmoothingAggregator::new(
        &STATE_OF_ACTIVE_RESOURCE_TUPLE,
        TimeMeasure::seconds(10.0),
        TimeMeasure::seconds(20.0),
    ));
    let alpha = smoothing.smoothing_factor();
    let sink = slidewin::aggregate::MemorySink::default();
    assert_ok!(window.add_observer(Aggregator::new(smoothing).with_sink(sink.clone())));

    assert_ok!(window.add_measurement(state(TimeMeasure::seconds(5.0), 1.0)));
    assert_ok!(window.add_measurement(state(TimeMeasure::seconds(35.0), 0.0)));
    window.no_more_data_available();

    let actual = values_of(&sink);
    assert_eq!(actual.iter().map(|(pt, _)| *pt).collect::<Vec<_>>(), vec![10.0, 20.0, 30.0, 40.0]);
    assert_relative_eq!(actual[0].1, alpha, epsilon = DELTA);
    assert_eq!(actual[1].1, actual[0].1);
    assert_eq!(actual[2].1, actual[0].1);
    assert_relative_eq!(actual[3].1, alpha * (1.0 - alpha), epsilon = DELTA);
}
