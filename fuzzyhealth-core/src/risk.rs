//! Risk category classification
//!
//! Global invariants enforced:
//! - Thresholds are fixed, exhaustive, and non-overlapping
//! - Every score (including NaN) maps to exactly one category

use serde::{Deserialize, Serialize};

/// Highest score still classified as low
pub const LOW_MAX: f64 = 30.0;
/// Highest score still classified as medium
pub const MEDIUM_MAX: f64 = 60.0;

/// Risk category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,    // <= 30
    Medium, // (30, 60]
    High,   // > 60
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
        }
    }
}

/// Category plus its display label, as persisted alongside a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevel {
    pub level: RiskCategory,
    pub label: &'static str,
}

impl From<RiskCategory> for RiskLevel {
    fn from(level: RiskCategory) -> Self {
        RiskLevel {
            level,
            label: level.label(),
        }
    }
}

/// Assign a risk category to a score
pub fn classify(score: f64) -> RiskCategory {
    if score <= LOW_MAX {
        RiskCategory::Low
    } else if score <= MEDIUM_MAX {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify(30.0), RiskCategory::Low);
        assert_eq!(classify(30.01), RiskCategory::Medium);
        assert_eq!(classify(60.0), RiskCategory::Medium);
        assert_eq!(classify(60.01), RiskCategory::High);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(-5.0), RiskCategory::Low);
        assert_eq!(classify(0.0), RiskCategory::Low);
        assert_eq!(classify(100.0), RiskCategory::High);
        assert_eq!(classify(f64::INFINITY), RiskCategory::High);
        assert_eq!(classify(f64::NEG_INFINITY), RiskCategory::Low);
    }

    #[test]
    fn test_nan_is_total() {
        // NaN fails both comparisons
        assert_eq!(classify(f64::NAN), RiskCategory::High);
    }

    #[test]
    fn test_categories_are_ordered() {
        assert!(RiskCategory::Low < RiskCategory::Medium);
        assert!(RiskCategory::Medium < RiskCategory::High);
    }

    #[test]
    fn test_risk_level_serialization() {
        let level = RiskLevel::from(classify(45.0));
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(json, r#"{"level":"medium","label":"Medium Risk"}"#);
    }
}
