//! Human-readable explanation of one inference
//!
//! The trace is presentation only: it is built from the pipeline's
//! artifacts and never feeds back into the score.

use crate::catalog::{FuzzifiedInputs, HealthInputs, Variable};
use crate::defuzzify::weighted_sum;
use crate::inference::RuleEvaluation;
use serde::Serialize;
use std::cmp::Ordering;

/// Number of active rules listed in the rule-evaluation step
pub const TOP_RULES_SHOWN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub title: String,
    pub content: String,
}

/// The three pipeline stages, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExplanationTrace {
    pub steps: Vec<TraceStep>,
}

pub fn build_trace(
    inputs: &HealthInputs,
    fuzzified: &FuzzifiedInputs,
    evaluations: &[RuleEvaluation],
    score: f64,
) -> ExplanationTrace {
    ExplanationTrace {
        steps: vec![
            TraceStep {
                title: "Fuzzification".to_string(),
                content: format_fuzzification_step(inputs, fuzzified),
            },
            TraceStep {
                title: "Rule Evaluation".to_string(),
                content: format_rules_step(evaluations),
            },
            TraceStep {
                title: "Defuzzification (Weighted Average)".to_string(),
                content: format_defuzzification_step(evaluations, score),
            },
        ],
    }
}

/// Active rules sorted by firing strength, descending
///
/// `sort_by` is stable, so ties keep rule-table order.
pub fn ranked_active_rules(evaluations: &[RuleEvaluation]) -> Vec<RuleEvaluation> {
    let mut ranked: Vec<RuleEvaluation> = evaluations.iter().filter(|e| e.is_active()).copied().collect();
    ranked.sort_by(|a, b| {
        b.firing_strength
            .partial_cmp(&a.firing_strength)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

fn format_fuzzification_step(inputs: &HealthInputs, fuzzified: &FuzzifiedInputs) -> String {
    let mut content = String::from("Input values:\n");
    for variable in Variable::ALL {
        let value = inputs.value(variable);
        match variable.unit() {
            Some(unit) => content.push_str(&format!("  {}: {} {}\n", variable.label(), value, unit)),
            None => content.push_str(&format!("  {}: {}\n", variable.label(), value)),
        }
    }

    content.push_str("\nMembership degrees:\n");
    content.push_str(&format!("  {}: {}\n", Variable::BloodPressure.label(), fuzzified.blood_pressure));
    content.push_str(&format!("  {}: {}\n", Variable::BloodSugar.label(), fuzzified.blood_sugar));
    content.push_str(&format!("  {}: {}\n", Variable::Bmi.label(), fuzzified.bmi));
    content.push_str(&format!("  {}: {}", Variable::Age.label(), fuzzified.age));
    content
}

fn format_rules_step(evaluations: &[RuleEvaluation]) -> String {
    let ranked = ranked_active_rules(evaluations);
    if ranked.is_empty() {
        return "No active rules (firing strength = 0)".to_string();
    }

    let mut content = format!("{} active rules:\n\n", ranked.len());
    for evaluation in ranked.iter().take(TOP_RULES_SHOWN) {
        content.push_str(&format!("{}\n", evaluation.rule.antecedent));
        content.push_str(&format!("   THEN Risk = {}\n", evaluation.rule.consequent));
        content.push_str(&format!("   Firing strength = {:.4}\n\n", evaluation.firing_strength));
    }

    if ranked.len() > TOP_RULES_SHOWN {
        content.push_str(&format!("... and {} more rules", ranked.len() - TOP_RULES_SHOWN));
    }
    content
}

fn format_defuzzification_step(evaluations: &[RuleEvaluation], score: f64) -> String {
    let sum = weighted_sum(evaluations);

    let mut content = String::from("Method: Weighted Average (Sugeno)\n\n");
    content.push_str("Formula:\n");
    content.push_str("  Z = Σ(wi × zi) / Σ(wi)\n\n");
    content.push_str("Where:\n");
    content.push_str("  wi = firing strength of rule i\n");
    content.push_str("  zi = constant output of rule i\n\n");
    content.push_str("Calculation:\n");
    content.push_str(&format!("  Σ(wi × zi) = {:.4}\n", sum.numerator));
    content.push_str(&format!("  Σ(wi) = {:.4}\n", sum.denominator));
    if sum.denominator == 0.0 {
        content.push_str("  No rule fired, using the fallback score\n");
    } else {
        content.push_str(&format!("  Z = {:.4} / {:.4}\n", sum.numerator, sum.denominator));
    }
    content.push_str(&format!("  Z = {:.2}\n\n", score));
    content.push_str(&format!("Final result: {:.2} (risk score 0-100)", score));
    content
}
