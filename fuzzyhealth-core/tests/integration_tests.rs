//! Integration tests for the inference pipeline

use fuzzyhealth_core::rules::RULES;
use fuzzyhealth_core::{analyze, classify, infer, render_json, render_text, HealthInputs, RenderOptions, RiskCategory};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn inputs(blood_pressure: f64, blood_sugar: f64, bmi: f64, age: u32) -> HealthInputs {
    HealthInputs {
        blood_pressure,
        blood_sugar,
        bmi,
        age,
    }
}

#[test]
fn test_healthy_young_adult() {
    init_logger();
    let result = infer(&inputs(120.0, 100.0, 22.0, 30));

    assert_eq!(result.fuzzified.blood_pressure.to_string(), "{rendah: 0, normal: 1, tinggi: 0}");
    assert_eq!(
        result.fuzzified.bmi.to_string(),
        "{underweight: 0, normal: 1, overweight: 0, obese: 0}"
    );

    // age 30 sits on dewasa's left foot, so {normal,normal,normal,dewasa} -> 20 does not fire
    assert_eq!(result.active_rules.len(), 1);
    assert_eq!(result.active_rules[0].rule, RULES[0]);
    assert_eq!(result.active_rules[0].firing_strength, 0.3333);
    assert!((result.score - 10.0).abs() < 1e-9);
    assert_eq!(classify(result.score), RiskCategory::Low);
}

#[test]
fn test_middle_aged_blends_two_rules() {
    init_logger();
    // age 32: muda = 0.2, dewasa = 0.1333
    let result = infer(&inputs(120.0, 100.0, 22.0, 32));
    assert_eq!(result.active_rules.len(), 2);

    let expected = (0.2 * 10.0 + 0.1333 * 20.0) / (0.2 + 0.1333);
    assert!((result.score - (expected * 100.0_f64).round() / 100.0).abs() < 1e-9);
    assert_eq!(result.score, 14.0);
}

#[test]
fn test_high_risk_profile() {
    init_logger();
    let result = infer(&inputs(160.0, 160.0, 33.0, 70));

    assert!(!result.active_rules.is_empty());
    assert!(result.active_rules.iter().all(|r| r.output >= 65.0));
    assert_eq!(result.score, 95.0);
    assert_eq!(classify(result.score), RiskCategory::High);
}

#[test]
fn test_overlapping_region_fires_many_rules() {
    init_logger();
    let result = infer(&inputs(135.0, 125.0, 24.5, 57));

    assert!(result.active_rules.len() > 5);
    assert!(result.trace.steps[1].content.contains("more rules"));
    assert!(result.score >= 10.0 && result.score <= 95.0);
}

#[test]
fn test_all_inputs_out_of_domain_falls_back() {
    init_logger();
    let result = infer(&inputs(10.0, 10.0, 5.0, 0));

    assert!(result.active_rules.is_empty());
    assert_eq!(result.score, 50.0);
    assert_eq!(classify(result.score), RiskCategory::Medium);
    assert_eq!(result.trace.steps[1].content, "No active rules (firing strength = 0)");
}

#[test]
fn test_uncovered_combination_falls_back() {
    init_logger();
    // rendah / tinggi / obese / muda has no rule
    let result = infer(&inputs(80.0, 200.0, 35.0, 15));
    assert!(result.active_rules.is_empty());
    assert_eq!(result.score, 50.0);
}

#[test]
fn test_analysis_report_for_at_risk_senior() {
    init_logger();
    let report = analyze(&inputs(145.0, 130.0, 27.0, 65));

    assert_eq!(report.risk_level.level, classify(report.risk_score));
    let titles: Vec<&str> = report.tips.iter().map(|t| t.title).collect();
    assert_eq!(
        titles,
        vec!["High Blood Pressure", "High Blood Sugar", "Excess Body Weight", "Senior Health"]
    );
}

#[test]
fn test_text_and_json_outputs_agree_on_score() {
    init_logger();
    let report = analyze(&inputs(135.0, 125.0, 24.5, 57));

    let text = render_text(&report, &RenderOptions::default());
    assert!(text.contains(&format!("{:.2} / 100", report.risk_score)));

    let value: serde_json::Value = serde_json::from_str(&render_json(&report)).unwrap();
    assert_eq!(value["riskScore"], report.risk_score);
    assert_eq!(
        value["activeRules"].as_array().map(Vec::len),
        Some(report.active_rules.len())
    );
}

#[test]
fn test_nan_input_matches_no_rule() {
    init_logger();
    let result = infer(&inputs(f64::NAN, 100.0, 22.0, 30));

    assert_eq!(result.fuzzified.blood_pressure.to_string(), "{rendah: 0, normal: 0, tinggi: 0}");
    assert!(result.active_rules.is_empty());
    assert_eq!(result.score, 50.0);
}
