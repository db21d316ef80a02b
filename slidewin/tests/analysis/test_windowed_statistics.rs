use approx::assert_relative_eq;
use claims::{assert_err, assert_ok};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use slidewin::aggregate::{StatisticalCharacteristic, StatisticalCharacterizationAggregator, UtilizationAggregator};
use slidewin::model::{
    MetricDescription, Sample, ScopeOfValidity, TimeMeasure, TimeUnit, RESPONSE_TIME, RESPONSE_TIME_TUPLE,
    STATE_OF_ACTIVE_RESOURCE_TUPLE, UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE,
};
use slidewin::window::RetentionStrategy;
use slidewin::AnalysisError;

use crate::fixtures::*;

fn characterize(characteristic: StatisticalCharacteristic, metric: &MetricDescription) -> StatisticalCharacterizationAggregator {
    assert_ok!(StatisticalCharacterizationAggregator::new(characteristic, metric))
}

#[test]
fn test_discrete_statistics_over_consecutive_windows() {
    Lazy::force(&slidewin::tracing::TEST_TRACING);
    let main_span = tracing::info_span!("test_discrete_statistics_over_consecutive_windows");
    let _main_span_guard = main_span.enter();

    let mut window = make_window(
        "response_times",
        &RESPONSE_TIME_TUPLE,
        TimeMeasure::seconds(10.0),
        None,
        RetentionStrategy::DiscardPriorToLowerBound,
    );
    let mean = observe(&mut window, characterize(StatisticalCharacteristic::ArithmeticMean, &RESPONSE_TIME_TUPLE));
    let median = observe(&mut window, characterize(StatisticalCharacteristic::Median, &RESPONSE_TIME_TUPLE));

    for (pt, v) in [(1.0, 1.0), (2.0, 4.0), (3.0, 9.0), (4.0, 16.0)] {
        assert_ok!(window.add_measurement(response_time(pt, v)));
    }
    window.on_window_full();

    for (pt, v) in [(11.0, 1.0), (12.0, 4.0), (13.0, 9.0)] {
        assert_ok!(window.add_measurement(response_time(pt, v)));
    }
    window.no_more_data_available();

    assert_eq!(values_of(&mean), vec![(10.0, 7.5), (20.0, 14.0 / 3.0)]);
    assert_eq!(values_of(&median), vec![(10.0, 6.5), (20.0, 4.0)]);
    assert!(window.is_empty());
    assert_eq!(window.current_lower_bound(), 20.0);
}

#[test]
fn test_continuous_statistics_weight_by_duration() {
    Lazy::force(&slidewin::tracing::TEST_TRACING);
    let metric = MetricDescription::tuple(
        "queue_length_tuple",
        "queue length tuple",
        slidewin::model::BaseMetric::new("queue_length", "queue length", ScopeOfValidity::Continuous),
    );

    let mut window = make_window(
        "queue",
        &metric,
        TimeMeasure::seconds(10.0),
        None,
        RetentionStrategy::KeepLastPriorToLowerBound,
    );
    let mean = observe(&mut window, characterize(StatisticalCharacteristic::ArithmeticMean, &metric));

    for (pt, v) in [(0.0, 2.0), (4.0, 8.0)] {
        assert_ok!(window.add_measurement(Sample::new(metric.clone(), pt, v)));
    }
    window.on_window_full();
    window.no_more_data_available();

    let actual = values_of(&mean);
    assert_eq!(actual.len(), 2);
    assert_eq!(actual[0].0, 10.0);
    assert_relative_eq!(actual[0].1, 5.6, epsilon = DELTA);
    // only the retained sample is left, held across the whole window
    assert_eq!(actual[1].0, 20.0);
    assert_relative_eq!(actual[1].1, 8.0, epsilon = DELTA);
}

#[test]
fn test_overlapping_windows_harmonic_mean() {
    let mut window = make_window(
        "response_times",
        &RESPONSE_TIME_TUPLE,
        TimeMeasure::new(1.0, TimeUnit::Minutes),
        Some(TimeMeasure::seconds(30.0)),
        RetentionStrategy::DiscardPriorToLowerBound,
    );
    let harmonic = observe(&mut window, characterize(StatisticalCharacteristic::HarmonicMean, &RESPONSE_TIME_TUPLE));
    assert_eq!(window.effective_length(), 60.0);

    for (pt, v) in [(10.0, 1.0), (40.0, 2.0), (50.0, 4.0)] {
        assert_ok!(window.add_measurement(response_time(pt, v)));
    }
    window.on_window_full();
    window.no_more_data_available();

    let actual = values_of(&harmonic);
    assert_eq!(actual.len(), 2);
    assert_eq!(actual[0].0, 60.0);
    assert_relative_eq!(actual[0].1, 3.0 / 1.75, epsilon = DELTA);
    assert_eq!(actual[1].0, 90.0);
    assert_relative_eq!(actual[1].1, 2.0 / 0.75, epsilon = DELTA);
}

#[test]
fn test_incompatible_observers_and_samples_are_rejected() {
    let mut window = make_window(
        "states",
        &STATE_OF_ACTIVE_RESOURCE_TUPLE,
        TimeMeasure::seconds(10.0),
        None,
        RetentionStrategy::default(),
    );

    let utilization = assert_ok!(UtilizationAggregator::new(&UTILIZATION_OF_ACTIVE_RESOURCE_TUPLE));
    let err = assert_err!(window.add_observer(slidewin::aggregate::Aggregator::new(utilization)));
    assert!(matches!(err, AnalysisError::IncompatibleListener { .. }));
    assert!(window.attached_observers().is_empty());

    let err = assert_err!(window.add_measurement(response_time(1.0, 1.0)));
    assert!(matches!(err, AnalysisError::InvalidMeasurement(_)));
    assert!(window.is_empty());

    let err = assert_err!(StatisticalCharacterizationAggregator::new(
        StatisticalCharacteristic::Median,
        &MetricDescription::Base(RESPONSE_TIME.clone()),
    ));
    assert!(err.is_configuration());
}
