//! Invariant Tests
//!
//! These tests explicitly validate properties that must always hold,
//! across arbitrary inputs.

use fuzzyhealth_core::catalog::{fuzzify_all, Variable};
use fuzzyhealth_core::inference::evaluate_rules;
use fuzzyhealth_core::rules::RULES;
use fuzzyhealth_core::{analyze, classify, defuzzify, infer, render_json, HealthInputs, MembershipFunction, RiskCategory};
use proptest::prelude::*;

fn arb_inputs() -> impl Strategy<Value = HealthInputs> {
    (40.0..230.0f64, 30.0..330.0f64, 10.0..50.0f64, 0u32..110).prop_map(
        |(blood_pressure, blood_sugar, bmi, age)| HealthInputs {
            blood_pressure,
            blood_sugar,
            bmi,
            age,
        },
    )
}

fn arb_triangle() -> impl Strategy<Value = MembershipFunction> {
    (-100.0..100.0f64, 0.1..50.0f64, 0.1..50.0f64)
        .prop_map(|(a, left, right)| MembershipFunction::triangular(a, a + left, a + left + right))
}

proptest! {
    #[test]
    fn prop_degree_in_unit_interval(x in -1.0e6..1.0e6f64, a in -100.0..100.0f64, w1 in 0.0..50.0f64, w2 in 0.0..50.0f64, w3 in 0.0..50.0f64) {
        let tri = MembershipFunction::triangular(a, a + w1, a + w1 + w2);
        let trap = MembershipFunction::trapezoidal(a, a + w1, a + w1 + w2, a + w1 + w2 + w3);
        for mf in [tri, trap] {
            let degree = mf.evaluate(x);
            prop_assert!((0.0..=1.0).contains(&degree), "{:?} at {} gave {}", mf, x, degree);
        }
    }

    #[test]
    fn prop_triangle_is_unimodal(mf in arb_triangle(), t in 0.0..1.0f64, s in 0.0..1.0f64) {
        if let MembershipFunction::Triangular { a, b, c } = mf {
            prop_assert_eq!(mf.evaluate(b), 1.0);
            prop_assert_eq!(mf.evaluate(a), 0.0);
            prop_assert_eq!(mf.evaluate(c), 0.0);

            let (lo, hi) = if t < s { (t, s) } else { (s, t) };
            let rising = (mf.evaluate(a + lo * (b - a)), mf.evaluate(a + hi * (b - a)));
            prop_assert!(rising.0 <= rising.1);
            let falling = (mf.evaluate(b + lo * (c - b)), mf.evaluate(b + hi * (c - b)));
            prop_assert!(falling.0 >= falling.1);
        }
    }

    #[test]
    fn prop_trapezoid_plateau_and_support(a in -100.0..100.0f64, w1 in 0.1..50.0f64, w2 in 0.0..50.0f64, w3 in 0.1..50.0f64, t in 0.0..=1.0f64, outside in 0.0..100.0f64) {
        let (b, c, d) = (a + w1, a + w1 + w2, a + w1 + w2 + w3);
        let mf = MembershipFunction::trapezoidal(a, b, c, d);
        let inside = (b + t * (c - b)).clamp(b, c);
        prop_assert_eq!(mf.evaluate(inside), 1.0);
        prop_assert_eq!(mf.evaluate(a - outside), 0.0);
        prop_assert_eq!(mf.evaluate(d + outside), 0.0);
    }

    #[test]
    fn prop_fuzzified_degrees_in_unit_interval(inputs in arb_inputs()) {
        for variable in Variable::ALL {
            for td in variable.fuzzify(inputs.value(variable)) {
                prop_assert!((0.0..=1.0).contains(&td.degree));
            }
        }
    }

    #[test]
    fn prop_firing_strength_bounded(inputs in arb_inputs()) {
        for evaluation in evaluate_rules(&RULES, &fuzzify_all(&inputs)) {
            prop_assert!((0.0..=1.0).contains(&evaluation.firing_strength));
        }
    }

    #[test]
    fn prop_score_within_consequent_range(inputs in arb_inputs()) {
        let result = infer(&inputs);
        if result.active_rules.is_empty() {
            prop_assert_eq!(result.score, 50.0);
        } else {
            prop_assert!(result.score >= 10.0 && result.score <= 95.0, "score {}", result.score);
        }
        prop_assert!(!result.score.is_nan());
    }

    #[test]
    fn prop_defuzzify_order_invariant(inputs in arb_inputs()) {
        let evaluations = evaluate_rules(&RULES, &fuzzify_all(&inputs));
        let mut reversed = evaluations.clone();
        reversed.reverse();
        prop_assert!((defuzzify(&evaluations) - defuzzify(&reversed)).abs() < 1e-9);
    }

    #[test]
    fn prop_infer_is_idempotent(inputs in arb_inputs()) {
        let first = infer(&inputs);
        let second = infer(&inputs);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(render_json(&analyze(&inputs)), render_json(&analyze(&inputs)));
    }

    #[test]
    fn prop_trace_always_three_steps(inputs in arb_inputs()) {
        let result = infer(&inputs);
        prop_assert_eq!(result.trace.steps.len(), 3);
    }
}

#[test]
fn test_classify_is_exhaustive() {
    let mut score = -10.0;
    while score <= 110.0 {
        let category = classify(score);
        let expected = if score <= 30.0 {
            RiskCategory::Low
        } else if score <= 60.0 {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        };
        assert_eq!(category, expected, "score {}", score);
        score += 0.25;
    }
}

#[test]
fn test_concurrent_calls_do_not_share_traces() {
    let a = HealthInputs::default();
    let b = HealthInputs {
        blood_pressure: 160.0,
        blood_sugar: 160.0,
        bmi: 33.0,
        age: 70,
    };

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let inputs = if i % 2 == 0 { a } else { b };
            std::thread::spawn(move || (inputs, infer(&inputs)))
        })
        .collect();

    for handle in handles {
        let (inputs, result) = handle.join().expect("inference thread panicked");
        assert_eq!(result, infer(&inputs));
    }
}
