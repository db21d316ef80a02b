use approx::assert_relative_eq;
use claims::{assert_err, assert_ok, assert_some};
use config::{File, FileFormat};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use slidewin::filter::{SampleBatch, UtilizationFilter};
use slidewin::model::{TimeMeasure, TimeUnit, RESPONSE_TIME_TUPLE, STATE_OF_ACTIVE_RESOURCE_TUPLE};
use slidewin::settings::Settings;

use crate::fixtures::*;

fn recorded_states() -> SampleBatch {
    let window_length = TimeMeasure::seconds(10.0);
    let samples = vec![
        state(TimeMeasure::ZERO, 42.0),
        state(
            TimeMeasure::new(window_length.to(TimeUnit::Milliseconds).value * 0.3, TimeUnit::Milliseconds),
            0.0,
        ),
        state(
            TimeMeasure::new(window_length.to(TimeUnit::Centiseconds).value * 0.6, TimeUnit::Centiseconds),
            42.0,
        ),
    ];
    assert_ok!(SampleBatch::from_samples(STATE_OF_ACTIVE_RESOURCE_TUPLE.clone(), samples))
}

#[test]
fn test_utilization_filter_over_mixed_units() {
    Lazy::force(&slidewin::tracing::TEST_TRACING);
    let main_span = tracing::info_span!("test_utilization_filter_over_mixed_units");
    let _main_span_guard = main_span.enter();

    let filter = UtilizationFilter::default();
    let actual = assert_ok!(filter.apply(&recorded_states()));
    assert_eq!(actual.len(), 1);
    let result = assert_some!(actual.iter().next());
    assert_eq!(result.point_in_time(), 10.0);
    assert_relative_eq!(result.value(), 0.7, epsilon = DELTA);
}

#[test]
fn test_utilization_filter_from_loaded_settings() {
    let settings = assert_ok!(Settings::from_source(File::from_str(
        r###"(
            utilization_filter: (
                window_length: (value: 5.0, unit: "seconds"),
                window_increment: (value: 5.0, unit: "seconds"),
            ),
        )"###,
        FileFormat::Ron,
    )));

    let filter = assert_ok!(UtilizationFilter::new(settings.utilization_filter));
    let actual = values_of_batch(&assert_ok!(filter.apply(&recorded_states())));
    assert_eq!(actual.len(), 2);
    assert_eq!(actual[0].0, 5.0);
    assert_relative_eq!(actual[0].1, 0.6, epsilon = DELTA);
    assert_eq!(actual[1].0, 10.0);
    assert_relative_eq!(actual[1].1, 0.8, epsilon = DELTA);
}

#[test]
fn test_utilization_filter_rejects_non_state_data() {
    let batch = SampleBatch::new(RESPONSE_TIME_TUPLE.clone());
    let err = assert_err!(UtilizationFilter::default().apply(&batch));
    assert!(err.is_configuration());
}

fn values_of_batch(batch: &SampleBatch) -> Vec<(f64, f64)> {
    batch.iter().map(|s| (s.point_in_time(), s.value())).collect()
}
