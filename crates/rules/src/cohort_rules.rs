//! CohortRules rule kind: eligibility thresholds and the bracket definitions
//! used to group age, commute distance and tenure.

use serde::{Deserialize, Serialize};

use crate::schema::CommonMetadata;

pub const KIND: &str = "CohortRules";

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level CohortRules rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CohortRulesRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: CohortRulesSpec,
}

/// Specification section of a CohortRules document.
///
/// Every section is optional in YAML and falls back to the dashboard
/// defaults, so a document can override just one threshold.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CohortRulesSpec {
    #[serde(default)]
    pub promotion: PromotionThresholds,
    #[serde(default)]
    pub retrenchment: RetrenchmentThresholds,
    #[serde(default)]
    pub brackets: BracketSet,
}

/// An active employee is a promotion candidate when both minimums are met.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PromotionThresholds {
    /// Inclusive.
    pub min_years_since_promotion: f64,
    /// Inclusive.
    pub min_average_rating: f64,
}

impl Default for PromotionThresholds {
    fn default() -> Self {
        Self {
            min_years_since_promotion: 8.0,
            min_average_rating: 3.5,
        }
    }
}

/// An active employee is a retrenchment candidate when they have waited at
/// least `min_years_since_promotion` and rate strictly below `max_average_rating`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RetrenchmentThresholds {
    /// Inclusive.
    pub min_years_since_promotion: f64,
    /// Exclusive.
    pub max_average_rating: f64,
}

impl Default for RetrenchmentThresholds {
    fn default() -> Self {
        Self {
            min_years_since_promotion: 4.0,
            max_average_rating: 3.0,
        }
    }
}

/// `n + 1` increasing boundaries and `n` labels. Bucket `i` covers
/// `[boundaries[i], boundaries[i + 1])`, or `(.., ..]` when `right_inclusive`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BracketDefinition {
    pub boundaries: Vec<f64>,
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub right_inclusive: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl BracketDefinition {
    pub fn new(boundaries: Vec<f64>, labels: &[&str]) -> Self {
        Self {
            boundaries,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            right_inclusive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BracketSet {
    #[serde(default = "default_age_brackets")]
    pub age: BracketDefinition,
    #[serde(default = "default_distance_brackets")]
    pub distance: BracketDefinition,
    #[serde(default = "default_tenure_brackets")]
    pub tenure: BracketDefinition,
}

impl Default for BracketSet {
    fn default() -> Self {
        Self {
            age: default_age_brackets(),
            distance: default_distance_brackets(),
            tenure: default_tenure_brackets(),
        }
    }
}

fn default_age_brackets() -> BracketDefinition {
    BracketDefinition::new(
        vec![18.0, 25.0, 35.0, 45.0, 55.0, 65.0],
        &["18-25", "26-35", "36-45", "46-55", "56-65"],
    )
}

fn default_distance_brackets() -> BracketDefinition {
    BracketDefinition::new(
        vec![0.0, 5.0, 15.0, 25.0, 35.0, 45.0],
        &["Very Short", "Short", "Medium", "Long", "Very Long"],
    )
}

fn default_tenure_brackets() -> BracketDefinition {
    BracketDefinition::new(
        vec![0.0, 2.0, 5.0, 10.0, f64::INFINITY],
        &["0-2 years", "3-5 years", "6-10 years", "11-15 years"],
    )
}

// ── Compiled (hot-path) types ───────────────────────────────────────

/// Thresholds and brackets handed to the cohort engine. The `spec` block is
/// already fully typed, so compiling only detaches it from the envelope.
pub type CompiledCohortRules = CohortRulesSpec;

impl CohortRulesRule {
    pub fn compile(&self) -> CompiledCohortRules {
        self.spec.clone()
    }
}

impl CohortRulesSpec {
    /// True when some (years, rating) pair satisfies both eligibility rules.
    ///
    /// Both year windows are unbounded above, so the overlap is decided by
    /// the rating thresholds alone.
    pub fn windows_overlap(&self) -> bool {
        self.promotion.min_average_rating < self.retrenchment.max_average_rating
    }
}
