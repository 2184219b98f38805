//! Weighted-average defuzzification
//!
//! Formula:
//! Z = Σ(w_i × z_i) / Σ(w_i), over rules with w_i > 0
//!
//! When no rule fires the score is `FALLBACK_SCORE`, never NaN.

use crate::inference::RuleEvaluation;
use serde::Serialize;

/// Score returned when the total firing strength is zero
pub const FALLBACK_SCORE: f64 = 50.0;

/// Numerator and denominator of the weighted average
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WeightedSum {
    /// Σ(w_i × z_i)
    pub numerator: f64,
    /// Σ(w_i)
    pub denominator: f64,
}

impl WeightedSum {
    /// Final score, or `FALLBACK_SCORE` when nothing fired
    pub fn score(&self) -> f64 {
        if self.denominator == 0.0 {
            FALLBACK_SCORE
        } else {
            self.numerator / self.denominator
        }
    }
}

pub fn weighted_sum(evaluations: &[RuleEvaluation]) -> WeightedSum {
    evaluations
        .iter()
        .filter(|e| e.firing_strength > 0.0)
        .fold(WeightedSum::default(), |acc, e| WeightedSum {
            numerator: acc.numerator + e.firing_strength * e.output,
            denominator: acc.denominator + e.firing_strength,
        })
}

pub fn defuzzify(evaluations: &[RuleEvaluation]) -> f64 {
    weighted_sum(evaluations).score()
}
