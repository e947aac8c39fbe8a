//! Rule validation with structured errors and warnings.
//!
//! Errors block the document from being used; warnings are advisory and
//! only logged by the loader.

mod cohort_checks;
pub(crate) mod naming;

use serde::{Deserialize, Serialize};

use crate::cohort_rules::CohortRulesRule;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted location in the document, e.g. `"spec.brackets.age.labels"`.
    pub path: String,
    pub message: String,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line, `path: message; ...`.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| {
                if e.path.is_empty() {
                    e.message.clone()
                } else {
                    format!("{}: {}", e.path, e.message)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a parsed [`CohortRulesRule`].
pub fn validate_rule(rule: &CohortRulesRule) -> ValidationResult {
    let mut result = ValidationResult::new();
    cohort_checks::validate_envelope(rule, &mut result);
    cohort_checks::validate_thresholds(rule, &mut result);
    let brackets = &rule.spec.brackets;
    cohort_checks::validate_bracket("spec.brackets.age", &brackets.age, &mut result);
    cohort_checks::validate_bracket("spec.brackets.distance", &brackets.distance, &mut result);
    cohort_checks::validate_bracket("spec.brackets.tenure", &brackets.tenure, &mut result);
    result
}

/// Parse raw YAML and validate. Parse failures are reported as a single error.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    match serde_yaml::from_str::<CohortRulesRule>(yaml) {
        Ok(rule) => validate_rule(&rule),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", format!("YAML parse error: {e}"));
            result
        }
    }
}
