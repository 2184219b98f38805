//! Advisory tips derived from raw inputs and the final score
//!
//! Checks run in a fixed order and are independent, except the BMI pair
//! (overweight / underweight) which is mutually exclusive.

use crate::catalog::HealthInputs;
use serde::Serialize;

pub const HYPERTENSION_BP: f64 = 140.0;
pub const HYPERGLYCEMIA_BS: f64 = 126.0;
pub const OVERWEIGHT_BMI: f64 = 25.0;
pub const UNDERWEIGHT_BMI: f64 = 18.5;
pub const ELDERLY_AGE: u32 = 60;
pub const HEALTHY_SCORE_MAX: f64 = 30.0;

/// Tip identifier, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipKind {
    Hypertension,
    Hyperglycemia,
    Overweight,
    Underweight,
    ElderlyCheckup,
    MaintainLifestyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvisoryTip {
    pub kind: TipKind,
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

impl TipKind {
    pub fn tip(self) -> AdvisoryTip {
        let (icon, title, text) = match self {
            TipKind::Hypertension => (
                "🩺",
                "High Blood Pressure",
                "Reduce salt intake, exercise regularly, and talk to your doctor about managing hypertension.",
            ),
            TipKind::Hyperglycemia => (
                "🍬",
                "High Blood Sugar",
                "Limit simple carbohydrates and sugar, eat more fiber, and consider an HbA1c check.",
            ),
            TipKind::Overweight => (
                "⚖️",
                "Excess Body Weight",
                "Combine a balanced diet with 150 minutes of exercise per week to reach a healthy weight.",
            ),
            TipKind::Underweight => (
                "🍎",
                "Low Body Weight",
                "Increase calorie intake with nutritious food. Consult a nutritionist if needed.",
            ),
            TipKind::ElderlyCheckup => (
                "👴",
                "Senior Health",
                "Have a routine health check at least every 6 months. Stay physically and socially active.",
            ),
            TipKind::MaintainLifestyle => (
                "✨",
                "Keep Up a Healthy Lifestyle",
                "Your health is in good shape. Keep a balanced diet and regular exercise.",
            ),
        };
        AdvisoryTip {
            kind: self,
            icon,
            title,
            text,
        }
    }
}

/// Select tips for a score and its inputs
///
/// May return an empty list.
pub fn advise(score: f64, inputs: &HealthInputs) -> Vec<AdvisoryTip> {
    let mut kinds = Vec::new();

    if inputs.blood_pressure >= HYPERTENSION_BP {
        kinds.push(TipKind::Hypertension);
    }
    if inputs.blood_sugar >= HYPERGLYCEMIA_BS {
        kinds.push(TipKind::Hyperglycemia);
    }
    if inputs.bmi >= OVERWEIGHT_BMI {
        kinds.push(TipKind::Overweight);
    } else if inputs.bmi < UNDERWEIGHT_BMI {
        kinds.push(TipKind::Underweight);
    }
    if inputs.age >= ELDERLY_AGE {
        kinds.push(TipKind::ElderlyCheckup);
    }
    if score <= HEALTHY_SCORE_MAX {
        kinds.push(TipKind::MaintainLifestyle);
    }

    kinds.into_iter().map(TipKind::tip).collect()
}
