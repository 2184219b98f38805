//! FuzzyHealth core library - zero-order Sugeno fuzzy inference for health risk

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Inference is a pure function of its inputs and the static catalog/rule base
// - No global mutable state; each call owns its trace
// - No randomness, clocks, threads, or async
// - Rule evaluation order is the rule table order
// - Identical input yields byte-for-byte identical output

pub mod advice;
pub mod catalog;
pub mod config;
pub mod defuzzify;
pub mod inference;
pub mod membership;
pub mod report;
pub mod risk;
pub mod rules;
pub mod trace;

pub use advice::{advise, AdvisoryTip};
pub use catalog::{fuzzify_all, FuzzifiedInputs, HealthInputs, TermDegree, Variable};
pub use defuzzify::{defuzzify, FALLBACK_SCORE};
pub use inference::{evaluate_rule, infer_with_rules, InferenceResult, RuleEvaluation};
pub use membership::MembershipFunction;
pub use report::{render_json, render_text, AnalysisReport, RenderOptions};
pub use risk::{classify, RiskCategory};
pub use rules::{rule_base, Rule};

/// Run the full pipeline with the built-in rule base
pub fn infer(inputs: &HealthInputs) -> InferenceResult {
    infer_with_rules(inputs, rule_base())
}

/// Degrees for every term of `variable` at `value`
pub fn fuzzify(variable: Variable, value: f64) -> Vec<TermDegree> {
    variable.fuzzify(value)
}

/// Infer, classify, and advise in one step
pub fn analyze(inputs: &HealthInputs) -> AnalysisReport {
    AnalysisReport::new(*inputs, infer(inputs))
}

/// Round to a fixed number of decimal places
pub(crate) fn round_decimals(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_decimals() {
        assert_eq!(round_decimals(0.333_333, 4), 0.3333);
        assert_eq!(round_decimals(13.333_333, 2), 13.33);
        assert_eq!(round_decimals(1.0, 4), 1.0);
        assert_eq!(round_decimals(0.0, 2), 0.0);
    }

    #[test]
    fn test_fuzzify_preview_query() {
        let degrees = fuzzify(Variable::BloodSugar, 100.0);
        let names: Vec<&str> = degrees.iter().map(|d| d.term).collect();
        assert_eq!(names, vec!["rendah", "normal", "tinggi"]);
        assert_eq!(degrees[1].degree, 1.0);
    }
}
