//! Property tests for the scheduling guarantees
//!
//! Random tick spacing, random readings (including missing and non-finite
//! values) and random configurations must never break poll throttling,
//! leak an invalid value to the sink, or touch unregistered sensors.

mod common;

use proptest::prelude::*;

use sensormon_core::{FixedSeed, MonitorConfig, SensorId};

use common::{Harness, START};

/// Reading as produced by a flaky sensor
fn reading() -> impl Strategy<Value = Option<f32>> {
    prop_oneof![
        6 => (-50.0f32..150.0).prop_map(Some),
        2 => Just(None),
        1 => Just(Some(f32::NAN)),
        1 => Just(Some(f32::INFINITY)),
    ]
}

fn config() -> impl Strategy<Value = MonitorConfig> {
    (1u32..5000, 0u32..40_000, 0.0f32..5.0, 1u32..6).prop_map(
        |(poll, extra, delta, divisor)| {
            MonitorConfig::default()
                .min_poll_delay_ms(poll)
                .report_interval_ms(poll + extra)
                .value_delta(delta)
                .jitter_divisor(divisor)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn polls_respect_min_delay(
        config in config(),
        steps in prop::collection::vec((1u32..3000, 0u8..3, reading()), 1..200),
        seed in any::<u64>(),
    ) {
        let harness = Harness::new(START);
        let mut monitor = harness
            .builder()
            .config(config)
            .register(0)
            .and_then(|b| b.register(1))
            .and_then(|b| b.register(2))
            .and_then(|b| b.begin(&mut FixedSeed(seed)))
            .unwrap();

        for (advance, id, value) in steps {
            harness.set(id, value);
            harness.clock.advance(advance);
            monitor.tick();
        }

        for id in 0..3 {
            for pair in harness.polls_of(id).windows(2) {
                prop_assert!(pair[1] - pair[0] >= config.min_poll_delay_ms);
            }
        }
    }

    #[test]
    fn only_finite_values_reach_the_sink(
        steps in prop::collection::vec((1u32..3000, reading()), 1..200),
        seed in any::<u64>(),
    ) {
        let harness = Harness::new(START);
        let mut monitor = harness
            .builder()
            .register(9)
            .and_then(|b| b.begin(&mut FixedSeed(seed)))
            .unwrap();

        for (advance, value) in steps {
            harness.set(9, value);
            harness.clock.advance(advance);
            monitor.tick();
        }

        for report in harness.all_reports() {
            prop_assert!(report.value.is_finite());
        }
        if let Some(last) = monitor.slot(9).and_then(|s| s.last_value()) {
            prop_assert!(last.is_finite());
        }
    }

    #[test]
    fn reports_never_go_stale(
        config in config(),
        value in -100.0f32..100.0,
        step in 1u32..500,
    ) {
        let harness = Harness::new(START);
        harness.set(1, Some(value));
        let mut monitor = harness
            .builder()
            .config(config)
            .register(1)
            .and_then(|b| b.begin(&mut FixedSeed(7)))
            .unwrap();

        monitor.tick();
        let duration = 4 * config.report_interval_ms + config.min_poll_delay_ms;
        harness.run(&mut monitor, duration, step);

        let reports = harness.reports_of(1);
        prop_assert!(reports.len() >= 2);
        let bound = config.report_interval_ms + config.min_poll_delay_ms + step;
        for pair in reports.windows(2) {
            prop_assert!(pair[1].at - pair[0].at <= bound);
        }
    }

    #[test]
    fn unregistered_sensors_are_never_polled(
        registered in prop::collection::btree_set(0u8..16, 1..5),
        step in 1u32..1000,
    ) {
        let harness = Harness::new(START);
        for id in 0..16 {
            harness.set(id, Some(id as f32));
        }

        let mut builder = harness.builder();
        for &id in &registered {
            builder = builder.register(id).unwrap();
        }
        let mut monitor = builder.begin(&mut FixedSeed(1)).unwrap();
        harness.run(&mut monitor, 20_000, step);

        let polled: Vec<SensorId> = harness.all_polls().iter().map(|(id, _)| *id).collect();
        prop_assert!(polled.iter().all(|id| registered.contains(id)));
        for id in &registered {
            prop_assert!(polled.contains(id));
        }
    }
}
