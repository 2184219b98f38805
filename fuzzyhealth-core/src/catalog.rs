//! Variable catalog and fuzzifier
//!
//! Each of the four input variables owns an ordered, closed set of linguistic
//! terms. Term sets are enums so rule antecedents are checked at compile time;
//! string names only appear at the edges (reports, the preview query).
//!
//! Global invariants enforced:
//! - Catalog data is static and never mutated
//! - Term order within a variable is fixed and drives output order
//! - Fuzzified degrees are rounded to `DEGREE_DECIMALS` places

use crate::membership::{sample_curve, CurvePoint, MembershipFunction};
use crate::round_decimals;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Decimal places kept for fuzzified degrees
pub const DEGREE_DECIMALS: i32 = 4;

/// Crisp inputs for one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInputs {
    /// Systolic blood pressure (mmHg)
    pub blood_pressure: f64,
    /// Fasting blood sugar (mg/dL)
    pub blood_sugar: f64,
    pub bmi: f64,
    /// Age in whole years
    pub age: u32,
}

impl HealthInputs {
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::BloodPressure => self.blood_pressure,
            Variable::BloodSugar => self.blood_sugar,
            Variable::Bmi => self.bmi,
            Variable::Age => f64::from(self.age),
        }
    }
}

impl Default for HealthInputs {
    fn default() -> Self {
        HealthInputs {
            blood_pressure: 120.0,
            blood_sugar: 100.0,
            bmi: 22.0,
            age: 30,
        }
    }
}

/// A linguistic term of one variable
pub trait Term: Copy + Eq + fmt::Debug + 'static {
    fn name(self) -> &'static str;
}

/// Terms shared by blood pressure and blood sugar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelTerm {
    Rendah,
    Normal,
    Tinggi,
}

impl Term for LevelTerm {
    fn name(self) -> &'static str {
        match self {
            LevelTerm::Rendah => "rendah",
            LevelTerm::Normal => "normal",
            LevelTerm::Tinggi => "tinggi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiTerm {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Term for BmiTerm {
    fn name(self) -> &'static str {
        match self {
            BmiTerm::Underweight => "underweight",
            BmiTerm::Normal => "normal",
            BmiTerm::Overweight => "overweight",
            BmiTerm::Obese => "obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeTerm {
    Muda,
    Dewasa,
    Lansia,
}

impl Term for AgeTerm {
    fn name(self) -> &'static str {
        match self {
            AgeTerm::Muda => "muda",
            AgeTerm::Dewasa => "dewasa",
            AgeTerm::Lansia => "lansia",
        }
    }
}

pub static BLOOD_PRESSURE_TERMS: &[(LevelTerm, MembershipFunction)] = &[
    (LevelTerm::Rendah, MembershipFunction::trapezoidal(70.0, 70.0, 90.0, 110.0)),
    (LevelTerm::Normal, MembershipFunction::triangular(90.0, 120.0, 140.0)),
    (LevelTerm::Tinggi, MembershipFunction::trapezoidal(130.0, 150.0, 200.0, 200.0)),
];

pub static BLOOD_SUGAR_TERMS: &[(LevelTerm, MembershipFunction)] = &[
    (LevelTerm::Rendah, MembershipFunction::trapezoidal(50.0, 50.0, 60.0, 80.0)),
    (LevelTerm::Normal, MembershipFunction::triangular(70.0, 100.0, 130.0)),
    (LevelTerm::Tinggi, MembershipFunction::trapezoidal(120.0, 150.0, 300.0, 300.0)),
];

pub static BMI_TERMS: &[(BmiTerm, MembershipFunction)] = &[
    (BmiTerm::Underweight, MembershipFunction::trapezoidal(15.0, 15.0, 16.0, 18.5)),
    (BmiTerm::Normal, MembershipFunction::triangular(18.0, 22.0, 25.0)),
    (BmiTerm::Overweight, MembershipFunction::triangular(24.0, 27.0, 30.0)),
    (BmiTerm::Obese, MembershipFunction::trapezoidal(29.0, 32.0, 45.0, 45.0)),
];

pub static AGE_TERMS: &[(AgeTerm, MembershipFunction)] = &[
    (AgeTerm::Muda, MembershipFunction::trapezoidal(1.0, 1.0, 20.0, 35.0)),
    (AgeTerm::Dewasa, MembershipFunction::triangular(30.0, 45.0, 60.0)),
    (AgeTerm::Lansia, MembershipFunction::trapezoidal(55.0, 65.0, 100.0, 100.0)),
];

/// The four input variables, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variable {
    BloodPressure,
    BloodSugar,
    Bmi,
    Age,
}

impl Variable {
    pub const ALL: [Variable; 4] = [
        Variable::BloodPressure,
        Variable::BloodSugar,
        Variable::Bmi,
        Variable::Age,
    ];

    /// Catalog name (camelCase, as used by collaborators)
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::BloodPressure => "bloodPressure",
            Variable::BloodSugar => "bloodSugar",
            Variable::Bmi => "bmi",
            Variable::Age => "age",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::BloodPressure => "Blood pressure",
            Variable::BloodSugar => "Blood sugar",
            Variable::Bmi => "BMI",
            Variable::Age => "Age",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Variable::BloodPressure => Some("mmHg"),
            Variable::BloodSugar => Some("mg/dL"),
            Variable::Bmi => None,
            Variable::Age => Some("years"),
        }
    }

    /// Display domain `(min, max)` used for charts and range checks
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Variable::BloodPressure => (70.0, 200.0),
            Variable::BloodSugar => (50.0, 300.0),
            Variable::Bmi => (15.0, 45.0),
            Variable::Age => (1.0, 100.0),
        }
    }

    pub fn in_domain(&self, value: f64) -> bool {
        let (min, max) = self.domain();
        value >= min && value <= max
    }

    /// Term names with their membership functions, in catalog order
    pub fn terms(&self) -> Vec<(&'static str, MembershipFunction)> {
        match self {
            Variable::BloodPressure => named_terms(BLOOD_PRESSURE_TERMS),
            Variable::BloodSugar => named_terms(BLOOD_SUGAR_TERMS),
            Variable::Bmi => named_terms(BMI_TERMS),
            Variable::Age => named_terms(AGE_TERMS),
        }
    }

    /// Fuzzify one value against this variable's terms
    ///
    /// This is the string-keyed preview query; inference uses the typed
    /// [`fuzzify_all`] instead.
    pub fn fuzzify(&self, value: f64) -> Vec<TermDegree> {
        match self {
            Variable::BloodPressure => fuzzify_terms(BLOOD_PRESSURE_TERMS, value).to_named(),
            Variable::BloodSugar => fuzzify_terms(BLOOD_SUGAR_TERMS, value).to_named(),
            Variable::Bmi => fuzzify_terms(BMI_TERMS, value).to_named(),
            Variable::Age => fuzzify_terms(AGE_TERMS, value).to_named(),
        }
    }

    /// Sample every term's curve across the display domain
    pub fn curves(&self, steps: usize) -> Vec<TermCurve> {
        let (min, max) = self.domain();
        self.terms()
            .into_iter()
            .map(|(term, mf)| TermCurve {
                term,
                function: mf,
                points: sample_curve(&mf, min, max, steps),
            })
            .collect()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variable {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bloodPressure" | "blood-pressure" | "blood_pressure" | "bp" => Ok(Variable::BloodPressure),
            "bloodSugar" | "blood-sugar" | "blood_sugar" | "bs" => Ok(Variable::BloodSugar),
            "bmi" => Ok(Variable::Bmi),
            "age" => Ok(Variable::Age),
            other => anyhow::bail!(
                "unknown variable '{}' (expected one of: bloodPressure, bloodSugar, bmi, age)",
                other
            ),
        }
    }
}

fn named_terms<T: Term>(terms: &[(T, MembershipFunction)]) -> Vec<(&'static str, MembershipFunction)> {
    terms.iter().map(|(term, mf)| (term.name(), *mf)).collect()
}

/// A term name with its degree
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermDegree {
    pub term: &'static str,
    pub degree: f64,
}

/// Sampled curve for one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermCurve {
    pub term: &'static str,
    pub function: MembershipFunction,
    pub points: Vec<CurvePoint>,
}

/// Degrees for every term of one variable, in catalog order
#[derive(Debug, Clone, PartialEq)]
pub struct Degrees<T: Term> {
    entries: Vec<(T, f64)>,
}

impl<T: Term> Degrees<T> {
    /// Degree for `term`, or 0 if the term is absent
    pub fn degree(&self, term: T) -> f64 {
        self.entries
            .iter()
            .find(|(t, _)| *t == term)
            .map(|(_, d)| *d)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (T, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn to_named(&self) -> Vec<TermDegree> {
        self.iter()
            .map(|(term, degree)| TermDegree {
                term: term.name(),
                degree,
            })
            .collect()
    }
}

impl<T: Term> FromIterator<(T, f64)> for Degrees<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        Degrees {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Term> Serialize for Degrees<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (term, degree) in self.iter() {
            map.serialize_entry(term.name(), &degree)?;
        }
        map.end()
    }
}

/// Renders as `{rendah: 0, normal: 1, tinggi: 0}`
impl<T: Term> fmt::Display for Degrees<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (term, degree)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", term.name(), degree)?;
        }
        f.write_str("}")
    }
}

/// Fuzzification result for all four variables
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzifiedInputs {
    pub blood_pressure: Degrees<LevelTerm>,
    pub blood_sugar: Degrees<LevelTerm>,
    pub bmi: Degrees<BmiTerm>,
    pub age: Degrees<AgeTerm>,
}

/// Evaluate every term of a set at `value`, rounded to `DEGREE_DECIMALS`
pub fn fuzzify_terms<T: Term>(terms: &[(T, MembershipFunction)], value: f64) -> Degrees<T> {
    terms
        .iter()
        .map(|(term, mf)| (*term, round_decimals(mf.evaluate(value), DEGREE_DECIMALS)))
        .collect()
}

/// Fuzzify all four inputs
pub fn fuzzify_all(inputs: &HealthInputs) -> FuzzifiedInputs {
    FuzzifiedInputs {
        blood_pressure: fuzzify_terms(BLOOD_PRESSURE_TERMS, inputs.blood_pressure),
        blood_sugar: fuzzify_terms(BLOOD_SUGAR_TERMS, inputs.blood_sugar),
        bmi: fuzzify_terms(BMI_TERMS, inputs.bmi),
        age: fuzzify_terms(AGE_TERMS, f64::from(inputs.age)),
    }
}
