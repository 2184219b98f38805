//! Rule evaluation and the full inference pipeline
//!
//! Global invariants enforced:
//! - Firing strength is the minimum of the four antecedent degrees
//! - Rules are evaluated in table order; active rules keep that order
//! - Each call owns its own trace; nothing survives between calls

use crate::catalog::{fuzzify_all, FuzzifiedInputs, HealthInputs};
use crate::defuzzify::defuzzify;
use crate::round_decimals;
use crate::rules::Rule;
use crate::trace::{build_trace, ExplanationTrace};
use serde::Serialize;

/// Decimal places kept for the reported risk score
pub const SCORE_DECIMALS: i32 = 2;

/// One rule's firing strength against a fuzzified input set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluation {
    pub rule: Rule,
    pub firing_strength: f64,
    pub output: f64,
}

impl RuleEvaluation {
    pub fn is_active(&self) -> bool {
        self.firing_strength > 0.0
    }
}

/// Output of one inference call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    /// Weighted-average score rounded to `SCORE_DECIMALS`
    #[serde(rename = "riskScore")]
    pub score: f64,
    #[serde(rename = "fuzzifiedInputs")]
    pub fuzzified: FuzzifiedInputs,
    /// Rules with firing strength > 0, in table order
    pub active_rules: Vec<RuleEvaluation>,
    #[serde(rename = "calculationSteps")]
    pub trace: ExplanationTrace,
}

/// Evaluate a rule with fuzzy AND (min)
pub fn evaluate_rule(rule: &Rule, fuzzified: &FuzzifiedInputs) -> RuleEvaluation {
    let a = &rule.antecedent;
    let firing_strength = fuzzified
        .blood_pressure
        .degree(a.bp)
        .min(fuzzified.blood_sugar.degree(a.bs))
        .min(fuzzified.bmi.degree(a.bmi))
        .min(fuzzified.age.degree(a.age));

    RuleEvaluation {
        rule: *rule,
        firing_strength,
        output: rule.consequent,
    }
}

/// Evaluate every rule in table order
pub fn evaluate_rules(rules: &[Rule], fuzzified: &FuzzifiedInputs) -> Vec<RuleEvaluation> {
    rules
        .iter()
        .map(|rule| {
            let evaluation = evaluate_rule(rule, fuzzified);
            log::trace!("{} -> w = {}", rule, evaluation.firing_strength);
            evaluation
        })
        .collect()
}

/// Rules with non-zero firing strength, table order preserved
pub fn active_rules(evaluations: &[RuleEvaluation]) -> Vec<RuleEvaluation> {
    evaluations.iter().filter(|e| e.is_active()).copied().collect()
}

/// Run the pipeline against an arbitrary rule table
pub fn infer_with_rules(inputs: &HealthInputs, rules: &[Rule]) -> InferenceResult {
    let fuzzified = fuzzify_all(inputs);
    let evaluations = evaluate_rules(rules, &fuzzified);
    let raw_score = defuzzify(&evaluations);
    let trace = build_trace(inputs, &fuzzified, &evaluations, raw_score);
    let active = active_rules(&evaluations);

    log::debug!(
        "inference: {} of {} rules active, score = {}",
        active.len(),
        evaluations.len(),
        raw_score
    );

    InferenceResult {
        score: round_decimals(raw_score, SCORE_DECIMALS),
        fuzzified,
        active_rules: active,
        trace,
    }
}
