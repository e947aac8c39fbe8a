//! Checks for the CohortRules kind: envelope, thresholds and brackets.

use std::collections::HashSet;

use super::naming::is_kebab_case;
use super::ValidationResult;
use crate::cohort_rules::{BracketDefinition, CohortRulesRule, KIND};
use crate::schema::API_VERSION;

pub(super) fn validate_envelope(rule: &CohortRulesRule, result: &mut ValidationResult) {
    if rule.api_version != API_VERSION {
        result.error(
            "apiVersion",
            format!("apiVersion must be '{}', got '{}'", API_VERSION, rule.api_version),
        );
    }
    if rule.kind != KIND {
        result.error(
            "kind",
            format!("kind must be '{}', got '{}'", KIND, rule.kind),
        );
    }
    if !is_kebab_case(&rule.metadata.id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                rule.metadata.id
            ),
        );
    }
    if rule.metadata.name.trim().is_empty() {
        result.warn("metadata.name", "name is empty");
    }
}

fn check_threshold(path: &str, value: f64, result: &mut ValidationResult) {
    if !value.is_finite() || value < 0.0 {
        result.error(
            path,
            format!("threshold must be a finite non-negative number, got {}", value),
        );
    }
}

pub(super) fn validate_thresholds(rule: &CohortRulesRule, result: &mut ValidationResult) {
    let p = &rule.spec.promotion;
    let r = &rule.spec.retrenchment;
    check_threshold(
        "spec.promotion.min_years_since_promotion",
        p.min_years_since_promotion,
        result,
    );
    check_threshold("spec.promotion.min_average_rating", p.min_average_rating, result);
    check_threshold(
        "spec.retrenchment.min_years_since_promotion",
        r.min_years_since_promotion,
        result,
    );
    check_threshold(
        "spec.retrenchment.max_average_rating",
        r.max_average_rating,
        result,
    );

    if rule.spec.windows_overlap() {
        result.warn(
            "spec",
            format!(
                "promotion (rating >= {}) and retrenchment (rating < {}) windows overlap; \
                 an employee can be flagged for both",
                p.min_average_rating, r.max_average_rating
            ),
        );
    }
}

pub(super) fn validate_bracket(path: &str, bracket: &BracketDefinition, result: &mut ValidationResult) {
    let b = &bracket.boundaries;

    if b.len() < 2 {
        result.error(
            format!("{path}.boundaries"),
            format!("at least 2 boundaries are required, got {}", b.len()),
        );
    }
    if b.iter().any(|v| v.is_nan()) {
        result.error(format!("{path}.boundaries"), "boundaries must not be NaN");
    } else if let Some(i) = b.windows(2).position(|w| w[0] >= w[1]) {
        result.error(
            format!("{path}.boundaries[{}]", i + 1),
            format!(
                "boundaries must be strictly increasing: {} is not greater than {}",
                b[i + 1],
                b[i]
            ),
        );
    }

    let expected = b.len().saturating_sub(1);
    if bracket.labels.len() != expected {
        result.error(
            format!("{path}.labels"),
            format!(
                "{} boundaries need {} labels, got {}",
                b.len(),
                expected,
                bracket.labels.len()
            ),
        );
    }

    let mut seen = HashSet::new();
    for (i, label) in bracket.labels.iter().enumerate() {
        if label.trim().is_empty() {
            result.error(format!("{path}.labels[{i}]"), "label must not be empty");
        } else if !seen.insert(label.as_str()) {
            result.error(
                format!("{path}.labels[{i}]"),
                format!("duplicate label '{}'", label),
            );
        }
    }
}
