//! Analysis records and output rendering
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output for identical inputs

use crate::advice::{advise, AdvisoryTip};
use crate::catalog::{FuzzifiedInputs, HealthInputs};
use crate::inference::{InferenceResult, RuleEvaluation};
use crate::risk::{classify, RiskLevel};
use crate::trace::ExplanationTrace;
use serde::Serialize;

/// Complete record of one analysis, as persisted or exported by callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub inputs: HealthInputs,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub fuzzified_inputs: FuzzifiedInputs,
    pub active_rules: Vec<RuleEvaluation>,
    pub calculation_steps: ExplanationTrace,
    pub tips: Vec<AdvisoryTip>,
}

impl AnalysisReport {
    /// Classify and advise on an inference result
    pub fn new(inputs: HealthInputs, result: InferenceResult) -> Self {
        let risk_level = RiskLevel::from(classify(result.score));
        let tips = advise(result.score, &inputs);

        AnalysisReport {
            inputs,
            risk_score: result.score,
            risk_level,
            fuzzified_inputs: result.fuzzified,
            active_rules: result.active_rules,
            calculation_steps: result.trace,
            tips,
        }
    }
}

/// Sections to include in text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_trace: bool,
    pub show_tips: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            show_trace: true,
            show_tips: true,
        }
    }
}

/// Render a report as text output
pub fn render_text(report: &AnalysisReport, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<14} {:.2} / 100\n", "Risk score:", report.risk_score));
    output.push_str(&format!(
        "{:<14} {} ({})\n",
        "Risk level:",
        report.risk_level.label,
        report.risk_level.level.as_str()
    ));
    output.push_str(&format!("{:<14} {}\n", "Active rules:", report.active_rules.len()));

    if options.show_trace {
        for step in &report.calculation_steps.steps {
            output.push_str(&format!("\n== {} ==\n", step.title));
            output.push_str(&step.content);
            output.push('\n');
        }
    }

    if options.show_tips && !report.tips.is_empty() {
        output.push_str("\n== Tips ==\n");
        for tip in &report.tips {
            output.push_str(&format!("{} {}\n", tip.icon, tip.title));
            output.push_str(&format!("   {}\n", tip.text));
        }
    }

    output
}

/// Render a report as JSON output
pub fn render_json(report: &AnalysisReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}
