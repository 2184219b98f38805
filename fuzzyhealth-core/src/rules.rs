//! Static zero-order Sugeno rule base
//!
//! Each rule names exactly one term per variable and carries a constant
//! risk output. The table is domain knowledge and is loaded once as data.

use crate::catalog::{AgeTerm as A, BmiTerm as B, LevelTerm as L, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows in [`RULES`]
pub const RULE_COUNT: usize = 35;

/// Conjunction of one term per variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Antecedent {
    pub bp: L,
    pub bs: L,
    pub bmi: B,
    pub age: A,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "if")]
    pub antecedent: Antecedent,
    /// Constant risk output in [0, 100]
    #[serde(rename = "then")]
    pub consequent: f64,
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IF BP={} AND BS={} AND BMI={} AND Age={}",
            self.bp.name(),
            self.bs.name(),
            self.bmi.name(),
            self.age.name()
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} THEN Risk = {}", self.antecedent, self.consequent)
    }
}

const fn rule(bp: L, bs: L, bmi: B, age: A, consequent: f64) -> Rule {
    Rule {
        antecedent: Antecedent { bp, bs, bmi, age },
        consequent,
    }
}

pub static RULES: [Rule; RULE_COUNT] = [
    // Optimal conditions
    rule(L::Normal, L::Normal, B::Normal, A::Muda, 10.0),
    rule(L::Normal, L::Normal, B::Normal, A::Dewasa, 20.0),
    rule(L::Rendah, L::Normal, B::Normal, A::Muda, 15.0),
    rule(L::Normal, L::Rendah, B::Normal, A::Muda, 20.0),
    // Moderate
    rule(L::Normal, L::Normal, B::Normal, A::Lansia, 35.0),
    rule(L::Normal, L::Normal, B::Overweight, A::Muda, 30.0),
    rule(L::Normal, L::Normal, B::Overweight, A::Dewasa, 40.0),
    rule(L::Tinggi, L::Normal, B::Normal, A::Muda, 45.0),
    rule(L::Normal, L::Tinggi, B::Normal, A::Muda, 45.0),
    rule(L::Tinggi, L::Normal, B::Normal, A::Dewasa, 50.0),
    rule(L::Normal, L::Tinggi, B::Normal, A::Dewasa, 50.0),
    rule(L::Normal, L::Normal, B::Underweight, A::Muda, 25.0),
    rule(L::Normal, L::Normal, B::Underweight, A::Lansia, 45.0),
    // Moderate to high
    rule(L::Tinggi, L::Tinggi, B::Normal, A::Muda, 55.0),
    rule(L::Tinggi, L::Normal, B::Overweight, A::Muda, 50.0),
    rule(L::Normal, L::Tinggi, B::Overweight, A::Muda, 50.0),
    rule(L::Tinggi, L::Tinggi, B::Normal, A::Dewasa, 60.0),
    rule(L::Tinggi, L::Normal, B::Overweight, A::Dewasa, 55.0),
    rule(L::Normal, L::Normal, B::Obese, A::Muda, 50.0),
    rule(L::Normal, L::Normal, B::Obese, A::Dewasa, 55.0),
    // High
    rule(L::Tinggi, L::Tinggi, B::Overweight, A::Muda, 65.0),
    rule(L::Tinggi, L::Tinggi, B::Normal, A::Lansia, 70.0),
    rule(L::Tinggi, L::Normal, B::Obese, A::Dewasa, 70.0),
    rule(L::Normal, L::Tinggi, B::Obese, A::Dewasa, 70.0),
    rule(L::Tinggi, L::Tinggi, B::Overweight, A::Dewasa, 75.0),
    rule(L::Tinggi, L::Tinggi, B::Overweight, A::Lansia, 80.0),
    rule(L::Tinggi, L::Tinggi, B::Obese, A::Muda, 75.0),
    rule(L::Tinggi, L::Tinggi, B::Obese, A::Dewasa, 85.0),
    rule(L::Tinggi, L::Tinggi, B::Obese, A::Lansia, 95.0),
    // Additional
    rule(L::Normal, L::Normal, B::Overweight, A::Lansia, 50.0),
    rule(L::Normal, L::Normal, B::Obese, A::Lansia, 65.0),
    rule(L::Tinggi, L::Normal, B::Normal, A::Lansia, 60.0),
    rule(L::Normal, L::Tinggi, B::Normal, A::Lansia, 60.0),
    rule(L::Rendah, L::Rendah, B::Underweight, A::Muda, 30.0),
    rule(L::Rendah, L::Normal, B::Underweight, A::Lansia, 50.0),
];

/// The built-in rule base
pub fn rule_base() -> &'static [Rule] {
    &RULES
}
