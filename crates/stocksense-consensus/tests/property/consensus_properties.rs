use chrono::{Duration, Utc};
use proptest::prelude::*;

use stocksense_consensus::{formula, weights};
use stocksense_core::config::ConsensusConfig;
use stocksense_core::models::{Observation, ObservationSource, StockStatus};

fn arb_status() -> impl Strategy<Value = StockStatus> {
    prop_oneof![
        Just(StockStatus::InStock),
        Just(StockStatus::Low),
        Just(StockStatus::Out),
        Just(StockStatus::Unknown),
    ]
}

fn arb_source() -> impl Strategy<Value = ObservationSource> {
    prop_oneof![
        Just(ObservationSource::Public),
        Just(ObservationSource::Staff),
        Just(ObservationSource::Import),
    ]
}

fn arb_observations() -> impl Strategy<Value = Vec<(StockStatus, ObservationSource, i64)>> {
    prop::collection::vec((arb_status(), arb_source(), 0i64..200_000), 0..80)
}

fn build(cases: &[(StockStatus, ObservationSource, i64)]) -> Vec<Observation> {
    let now = Utc::now();
    cases
        .iter()
        .map(|(status, source, age_minutes)| {
            Observation::new("item", "loc", *status, *source)
                .with_created_at(now - Duration::minutes(*age_minutes))
        })
        .collect()
}

proptest! {
    #[test]
    fn confidence_stays_in_unit_range(cases in arb_observations()) {
        let config = ConsensusConfig::default();
        let observations = build(&cases);

        if let Some(verdict) = formula::compute(&observations, Utc::now(), &config) {
            let c = verdict.confidence.value();
            prop_assert!((0.0..=1.0).contains(&c), "confidence out of range: {c}");
        } else {
            prop_assert!(observations.is_empty());
        }
    }

    #[test]
    fn winner_bucket_is_never_strictly_beaten(cases in arb_observations()) {
        let config = ConsensusConfig::default();
        let observations = build(&cases);
        let breakdown = formula::compute_breakdown(&observations, Utc::now(), &config);

        if let Some(verdict) = breakdown.verdict {
            let winning = breakdown
                .bucket_sums
                .iter()
                .find(|(status, _)| *status == verdict.status)
                .map(|(_, sum)| *sum)
                .unwrap();
            for (status, sum) in breakdown.bucket_sums {
                prop_assert!(
                    sum <= winning + 1e-12,
                    "{status} bucket {sum} beats winner {winning}"
                );
            }
        }
    }

    #[test]
    fn verdict_ignores_input_order(cases in arb_observations()) {
        let config = ConsensusConfig::default();
        let now = Utc::now();
        let forward = build(&cases);
        let mut backward = forward.clone();
        backward.reverse();

        let a = formula::compute(&forward, now, &config);
        let b = formula::compute(&backward, now, &config);
        match (a, b) {
            (None, None) => {}
            (Some(a), Some(b)) => {
                prop_assert_eq!(a.status, b.status);
                prop_assert_eq!(a.last_verified_at, b.last_verified_at);
                prop_assert!((a.confidence.value() - b.confidence.value()).abs() < 1e-9);
            }
            other => prop_assert!(false, "order changed the outcome: {:?}", other),
        }
    }

    #[test]
    fn decay_factor_is_bounded_and_monotonic(age in 0.0f64..100_000.0) {
        let config = ConsensusConfig::default();
        let here = weights::decay_factor(age, config.decay_floor, config.decay_horizon_hours);
        let later =
            weights::decay_factor(age + 1.0, config.decay_floor, config.decay_horizon_hours);

        prop_assert!((config.decay_floor..=1.0).contains(&here), "decay out of range: {here}");
        prop_assert!(later <= here + 1e-12, "decay not monotonic: {later} > {here}");
    }

    #[test]
    fn observation_weight_never_exceeds_its_source_weight(
        source in arb_source(),
        age_minutes in 0i64..200_000,
    ) {
        let config = ConsensusConfig::default();
        let now = Utc::now();
        let obs = Observation::new("item", "loc", StockStatus::Unknown, source)
            .with_created_at(now - Duration::minutes(age_minutes));

        let w = weights::observation_weight(&obs, now, &config);
        prop_assert!(w <= source.weight() + 1e-12);
        prop_assert!(w >= source.weight() * config.decay_floor - 1e-12);
    }
}
