use proptest::prelude::*;

use policysim::coefficients::{coefficient, lookup, InteractionKind};
use policysim::{
    apply_scenario, compute_metrics, generate_series, Engine, MetricId, MetricVector, PolicyId,
    PolicyPair, Scenario, SimulationInput,
};

fn policy() -> impl Strategy<Value = PolicyId> {
    proptest::sample::select(PolicyId::ALL.to_vec())
}

fn metric() -> impl Strategy<Value = MetricId> {
    proptest::sample::select(MetricId::ALL.to_vec())
}

fn scenario() -> impl Strategy<Value = Scenario> {
    proptest::sample::select(Scenario::ALL.to_vec())
}

fn input() -> impl Strategy<Value = SimulationInput> {
    (
        proptest::collection::btree_set(policy(), 0..=PolicyId::COUNT),
        proptest::collection::btree_map(policy(), 0u8..=100, 0..=PolicyId::COUNT),
        scenario(),
    )
        .prop_map(|(selected, intensities, scenario)| {
            let mut input = SimulationInput::new().with_scenario(scenario);
            for p in selected {
                input = input.with_selected(p);
            }
            for (p, i) in intensities {
                input = input.with_intensity(p, i);
            }
            input
        })
}

fn metric_vector() -> impl Strategy<Value = MetricVector> {
    proptest::array::uniform8(-50.0f64..150.0).prop_map(MetricVector::from_array)
}

fn loose_json() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        (-1000.0f64..1000.0).prop_map(serde_json::Value::from),
        "[A-Z_]{0,20}".prop_map(serde_json::Value::from),
        Just(serde_json::Value::from("PROTECT_STD")),
    ]
}

proptest! {
    #[test]
    fn metrics_stay_in_bounds(input in input()) {
        let m = compute_metrics(&input);
        for (id, v) in m.iter() {
            prop_assert!((0.0..=100.0).contains(&v), "{} = {}", id, v);
        }
    }

    #[test]
    fn computation_is_idempotent(input in input()) {
        let a = compute_metrics(&input);
        let b = compute_metrics(&input);
        for (id, v) in a.iter() {
            prop_assert_eq!(v.to_bits(), b[id].to_bits());
        }
    }

    #[test]
    fn neutral_single_lever_is_identity(p in policy()) {
        let input = SimulationInput::new().with_policy(p, 50);
        prop_assert_eq!(compute_metrics(&input), MetricVector::neutral());
    }

    #[test]
    fn single_lever_moves_with_coefficient_sign(p in policy(), lo in 50u8..=100, hi in 50u8..=100) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let low = compute_metrics(&SimulationInput::new().with_policy(p, lo));
        let high = compute_metrics(&SimulationInput::new().with_policy(p, hi));
        for m in MetricId::ALL {
            let c = coefficient(p, m);
            if c > 0.0 {
                prop_assert!(high[m] >= low[m]);
            } else if c < 0.0 {
                prop_assert!(high[m] <= low[m]);
            } else {
                prop_assert_eq!(high[m], low[m]);
            }
        }
    }

    #[test]
    fn single_lever_never_triggers_interactions(p in policy(), i in 0u8..=100) {
        let engine = Engine::default();
        let input = SimulationInput::new().with_policy(p, i);
        prop_assert!(engine.explain(&input).interactions.is_empty());
    }

    #[test]
    fn interaction_fires_only_with_both_members(a in policy(), b in policy(), ia in 0u8..=100, ib in 0u8..=100) {
        prop_assume!(a != b);
        let pair = PolicyPair::new(a, b);
        let has_table_entry = lookup(InteractionKind::Synergy, pair).is_some()
            || lookup(InteractionKind::Tension, pair).is_some();

        let engine = Engine::default();
        let alone = SimulationInput::new().with_policy(a, ia).with_intensity(b, ib);
        let together = alone.clone().with_selected(b);

        prop_assert!(engine.explain(&alone).interactions.iter().all(|x| x.pair != pair));
        let fired = engine.explain(&together).interactions.iter().any(|x| x.pair == pair);
        prop_assert_eq!(fired, has_table_entry);
    }

    #[test]
    fn series_endpoints_match_contract(m in metric(), input in input()) {
        let series = generate_series(m, &input);
        prop_assert_eq!(series.points.len(), 16);
        prop_assert_eq!(series.points[0].year, 2025);
        prop_assert_eq!(series.points[15].year, 2040);
        prop_assert_eq!(series.points[0].value, 50.0);
        prop_assert_eq!(series.points[15].value, compute_metrics(&input)[m]);
    }

    #[test]
    fn series_is_monotonic_toward_target(m in metric(), input in input()) {
        let series = generate_series(m, &input);
        let rising = series.points[15].value >= series.points[0].value;
        for w in series.points.windows(2) {
            if rising {
                prop_assert!(w[1].value >= w[0].value);
            } else {
                prop_assert!(w[1].value <= w[0].value);
            }
        }
    }

    #[test]
    fn normal_scenario_is_a_no_op(v in metric_vector()) {
        prop_assert_eq!(apply_scenario(&v, Scenario::Normal), v);
    }

    #[test]
    fn fingerprint_equality_implies_equal_metrics(a in input(), b in input()) {
        if a.fingerprint() == b.fingerprint() {
            prop_assert_eq!(compute_metrics(&a), compute_metrics(&b));
        }
    }

    #[test]
    fn raw_boundary_never_panics(
        selected in proptest::collection::vec("[A-Z_]{0,20}", 0..6),
        intensities in proptest::collection::btree_map("[A-Z_]{0,20}", -1000.0f64..1000.0, 0..6),
        scenario in proptest::option::of("[A-Z_]{0,12}"),
    ) {
        let raw = policysim::RawSimulationInput {
            selected_policies: serde_json::json!(selected),
            policy_intensities: serde_json::json!(intensities),
            scenario: serde_json::json!(scenario),
        };
        let m = compute_metrics(&raw.normalize());
        prop_assert!(m.is_bounded());
    }

    #[test]
    fn raw_boundary_accepts_any_entry_types(
        selected in proptest::collection::vec(loose_json(), 0..6),
        intensities in proptest::collection::btree_map("[A-Z_]{0,20}", loose_json(), 0..6),
        scenario in loose_json(),
    ) {
        let raw = policysim::RawSimulationInput {
            selected_policies: serde_json::Value::from(selected),
            policy_intensities: serde_json::json!(intensities),
            scenario,
        };
        let json = serde_json::to_string(&raw).unwrap();
        prop_assert!(policysim::RawSimulationInput::from_json_str(&json).is_ok());
        prop_assert!(compute_metrics(&raw.normalize()).is_bounded());
    }
}
